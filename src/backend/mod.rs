// ClipUtil - Module backend
// Surface de l'API systeme du presse-papiers
//
// Le trait `ClipboardBackend` reprend une a une les fonctions Win32
// consommees par la session : ouverture/fermeture, vidage, lecture et
// ecriture par format, enumeration des formats, allocation et
// verrouillage des blocs de memoire globale, noms de formats.
//
// Les valeurs de retour suivent les conventions Win32 (bool, handle
// optionnel) ; c'est la session qui les traduit en `ClipError`.
//
// # Implementations
// - `win32`  : appels FFI reels (Windows uniquement)
// - `memory` : simulation en memoire du presse-papiers systeme, avec
//              propriete exclusive entre handles et injection de pannes
//
// # Concurrence
// Le presse-papiers est une ressource exclusive a l'echelle du systeme.
// Aucune synchronisation n'est faite dans le processus : l'appelant doit
// serialiser l'usage depuis plusieurs threads.

/// Simulation en memoire du presse-papiers systeme.
pub mod memory;
/// Implementation Win32 via FFI.
#[cfg(windows)]
pub mod win32;

pub use memory::MemoryBackend;
#[cfg(windows)]
pub use win32::Win32Backend;

use crate::error::ClipResult;

/// Backend du presse-papiers de la plateforme courante.
#[cfg(windows)]
pub type SystemBackend = Win32Backend;

/// Handle opaque vers un bloc de memoire globale deplacable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryBlock(usize);

impl MemoryBlock {
    /// Construit un handle a partir de sa valeur brute.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Valeur brute du handle.
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

/// Fonctions systeme du presse-papiers et de la memoire globale.
pub trait ClipboardBackend {
    /// OpenClipboard : acquiert le presse-papiers pour ce processus.
    fn open(&mut self) -> bool;
    /// CloseClipboard.
    fn close(&mut self) -> bool;
    /// EmptyClipboard.
    fn empty(&mut self) -> bool;
    /// EnumClipboardFormats : format suivant `previous`, 0 en fin de liste.
    fn enum_formats(&mut self, previous: u32) -> u32;
    /// GetClipboardData.
    fn get_data(&mut self, format: u32) -> Option<MemoryBlock>;
    /// SetClipboardData : le systeme devient proprietaire du bloc.
    fn set_data(&mut self, format: u32, block: MemoryBlock) -> Option<MemoryBlock>;
    /// GlobalAlloc.
    fn alloc(&mut self, flags: u32, size: usize) -> Option<MemoryBlock>;
    /// GlobalFree, pour un bloc jamais transmis au systeme.
    fn free(&mut self, block: MemoryBlock);
    /// GlobalLock.
    fn lock(&mut self, block: MemoryBlock) -> bool;
    /// GlobalUnlock.
    fn unlock(&mut self, block: MemoryBlock) -> bool;
    /// GlobalSize, 0 en cas d'echec.
    fn size(&self, block: MemoryBlock) -> usize;
    /// Copie le contenu d'un bloc verrouille.
    fn read(&self, block: MemoryBlock) -> Option<Vec<u8>>;
    /// Ecrit au debut d'un bloc verrouille.
    fn write(&mut self, block: MemoryBlock, bytes: &[u8]) -> bool;
    /// RegisterClipboardFormatW.
    fn register_format(&mut self, name: &str) -> ClipResult<u32>;
    /// GetClipboardFormatNameW : None si le code n'a pas de nom.
    fn format_name(&self, format: u32) -> ClipResult<Option<String>>;
}
