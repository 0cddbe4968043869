// ClipUtil - Presse-papiers simule en memoire
//
// `MemoryBackend` reproduit le comportement observable du presse-papiers
// Windows sans appel systeme :
// - propriete exclusive : un seul handle a la fois peut ouvrir le
//   presse-papiers ; les handles crees par `handle()` partagent le meme
//   etat et simulent d'autres processus
// - blocs de memoire globale avec compteur de verrous
// - ordre d'enumeration des formats = ordre des SetClipboardData
// - formats enregistres a partir de 0xC000, noms insensibles a la casse
// - injection de pannes (`Faults`) pour tester les chemins d'erreur
//
// Un bloc alloue sans GMEM_ZEROINIT est rempli d'octets non nuls afin de
// reveler les terminateurs oublies.
//
// # Portabilite
// Ce module est en pur Rust ; il sert de backend aux tests et aux
// plateformes sans presse-papiers Win32.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::{ClipboardBackend, MemoryBlock};
use crate::constants::*;
use crate::error::{ClipError, ClipResult};

/// Octet de remplissage des blocs non initialises.
const UNINIT_FILL: u8 = 0xCD;

/// Pannes injectables dans le presse-papiers simule.
#[derive(Debug, Default, Clone)]
pub struct Faults {
    /// Nombre de prochains OpenClipboard a refuser
    pub deny_open: u32,
    pub fail_empty: bool,
    pub fail_lock: bool,
    pub fail_unlock: bool,
    pub fail_alloc: bool,
    pub fail_set: bool,
    /// Code d'erreur retourne par GetClipboardFormatNameW
    pub format_name_error: Option<u32>,
    /// EnumClipboardFormats reboucle sur le premier format au lieu de 0
    pub enum_cycle: bool,
}

#[derive(Debug)]
struct Block {
    data: Vec<u8>,
    locks: u32,
}

#[derive(Debug, Default)]
struct MemoryState {
    owner: Option<u64>,
    next_owner: u64,
    /// (format, bloc) dans l'ordre d'ecriture
    formats: Vec<(u32, usize)>,
    blocks: HashMap<usize, Block>,
    next_block: usize,
    registered: Vec<String>,
    faults: Faults,
}

impl MemoryState {
    fn new_owner(&mut self) -> u64 {
        self.next_owner += 1;
        self.next_owner
    }

    fn release_block(&mut self, id: usize) {
        self.blocks.remove(&id);
    }
}

/// Presse-papiers simule, partage entre tous ses handles.
#[derive(Debug)]
pub struct MemoryBackend {
    id: u64,
    state: Arc<Mutex<MemoryState>>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Cree un presse-papiers simule vide.
    pub fn new() -> Self {
        let mut state = MemoryState::default();
        let id = state.new_owner();
        Self {
            id,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Nouveau handle sur le meme presse-papiers (autre "processus").
    pub fn handle(&self) -> Self {
        let id = self.state().new_owner();
        Self {
            id,
            state: Arc::clone(&self.state),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // Un test qui panique ne doit pas bloquer les autres handles
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn owns(&self, state: &MemoryState) -> bool {
        state.owner == Some(self.id)
    }

    /// Modifie les pannes injectees.
    pub fn faults(&self, f: impl FnOnce(&mut Faults)) {
        f(&mut self.state().faults);
    }

    /// Vrai si ce handle detient le presse-papiers.
    pub fn is_held(&self) -> bool {
        self.owns(&self.state())
    }

    /// Vrai si un handle quelconque detient le presse-papiers.
    pub fn is_held_by_anyone(&self) -> bool {
        self.state().owner.is_some()
    }

    /// Formats presents, dans l'ordre d'enumeration.
    pub fn formats(&self) -> Vec<u32> {
        self.state().formats.iter().map(|(f, _)| *f).collect()
    }

    /// Compteur de verrous d'un bloc, None si le bloc n'existe pas.
    pub fn lock_count(&self, block: MemoryBlock) -> Option<u32> {
        self.state().blocks.get(&block.as_raw()).map(|b| b.locks)
    }

    /// Nombre de blocs encore alloues.
    pub fn live_blocks(&self) -> usize {
        self.state().blocks.len()
    }

    /// Contenu brut d'un format, sans passer par Open/Lock.
    pub fn peek(&self, format: u32) -> Option<Vec<u8>> {
        let state = self.state();
        let (_, id) = state.formats.iter().find(|(f, _)| *f == format)?;
        state.blocks.get(id).map(|b| b.data.clone())
    }

    /// Depose des donnees comme le ferait une autre application.
    pub fn seed(&self, format: u32, bytes: &[u8]) {
        let mut state = self.state();
        let id = state.next_block;
        state.next_block += 1;
        state.blocks.insert(id, Block { data: bytes.to_vec(), locks: 0 });
        if let Some(pos) = state.formats.iter().position(|(f, _)| *f == format) {
            let (_, old) = state.formats.remove(pos);
            state.release_block(old);
        }
        state.formats.push((format, id));
    }
}

impl ClipboardBackend for MemoryBackend {
    fn open(&mut self) -> bool {
        let mut state = self.state();
        if state.faults.deny_open > 0 {
            state.faults.deny_open -= 1;
            return false;
        }
        match state.owner {
            Some(owner) if owner != self.id => false,
            _ => {
                state.owner = Some(self.id);
                true
            }
        }
    }

    fn close(&mut self) -> bool {
        let mut state = self.state();
        if !self.owns(&state) {
            return false;
        }
        state.owner = None;
        true
    }

    fn empty(&mut self) -> bool {
        let mut state = self.state();
        if !self.owns(&state) || state.faults.fail_empty {
            return false;
        }
        let previous: Vec<usize> = state.formats.drain(..).map(|(_, id)| id).collect();
        for id in previous {
            state.release_block(id);
        }
        true
    }

    fn enum_formats(&mut self, previous: u32) -> u32 {
        let state = self.state();
        if !self.owns(&state) {
            return 0;
        }
        let next = if previous == 0 {
            state.formats.first()
        } else {
            state
                .formats
                .iter()
                .position(|(f, _)| *f == previous)
                .and_then(|pos| state.formats.get(pos + 1))
                .or_else(|| state.faults.enum_cycle.then(|| state.formats.first()).flatten())
        };
        next.map_or(0, |(f, _)| *f)
    }

    fn get_data(&mut self, format: u32) -> Option<MemoryBlock> {
        let state = self.state();
        if !self.owns(&state) {
            return None;
        }
        state
            .formats
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, id)| MemoryBlock::from_raw(*id))
    }

    fn set_data(&mut self, format: u32, block: MemoryBlock) -> Option<MemoryBlock> {
        let mut state = self.state();
        if !self.owns(&state) || state.faults.fail_set {
            return None;
        }
        if !state.blocks.contains_key(&block.as_raw()) {
            return None;
        }
        if let Some(pos) = state.formats.iter().position(|(f, _)| *f == format) {
            let (_, old) = state.formats.remove(pos);
            state.release_block(old);
        }
        state.formats.push((format, block.as_raw()));
        Some(block)
    }

    fn alloc(&mut self, flags: u32, size: usize) -> Option<MemoryBlock> {
        let mut state = self.state();
        if state.faults.fail_alloc || size == 0 {
            return None;
        }
        let fill = if flags & GMEM_ZEROINIT != 0 { 0 } else { UNINIT_FILL };
        let id = state.next_block;
        state.next_block += 1;
        state.blocks.insert(id, Block { data: vec![fill; size], locks: 0 });
        Some(MemoryBlock::from_raw(id))
    }

    fn free(&mut self, block: MemoryBlock) {
        let mut state = self.state();
        let on_clipboard = state.formats.iter().any(|(_, id)| *id == block.as_raw());
        if !on_clipboard {
            state.release_block(block.as_raw());
        }
    }

    fn lock(&mut self, block: MemoryBlock) -> bool {
        let mut state = self.state();
        if state.faults.fail_lock {
            return false;
        }
        match state.blocks.get_mut(&block.as_raw()) {
            Some(b) => {
                b.locks += 1;
                true
            }
            None => false,
        }
    }

    fn unlock(&mut self, block: MemoryBlock) -> bool {
        let mut state = self.state();
        if state.faults.fail_unlock {
            return false;
        }
        match state.blocks.get_mut(&block.as_raw()) {
            Some(b) if b.locks > 0 => {
                b.locks -= 1;
                true
            }
            _ => false,
        }
    }

    fn size(&self, block: MemoryBlock) -> usize {
        self.state().blocks.get(&block.as_raw()).map_or(0, |b| b.data.len())
    }

    fn read(&self, block: MemoryBlock) -> Option<Vec<u8>> {
        let state = self.state();
        let b = state.blocks.get(&block.as_raw())?;
        if b.locks == 0 {
            return None;
        }
        Some(b.data.clone())
    }

    fn write(&mut self, block: MemoryBlock, bytes: &[u8]) -> bool {
        let mut state = self.state();
        match state.blocks.get_mut(&block.as_raw()) {
            Some(b) if b.locks > 0 && bytes.len() <= b.data.len() => {
                b.data[..bytes.len()].copy_from_slice(bytes);
                true
            }
            _ => false,
        }
    }

    fn register_format(&mut self, name: &str) -> ClipResult<u32> {
        if name.is_empty() {
            return Err(ClipError::Os {
                op: "RegisterClipboardFormatW",
                code: ERROR_INVALID_PARAMETER,
            });
        }
        let mut state = self.state();
        let index = match state
            .registered
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                state.registered.push(name.to_string());
                state.registered.len() - 1
            }
        };
        Ok(REGISTERED_FORMAT_BASE + index as u32)
    }

    fn format_name(&self, format: u32) -> ClipResult<Option<String>> {
        let state = self.state();
        if let Some(code) = state.faults.format_name_error {
            return Err(ClipError::Os { op: "GetClipboardFormatNameW", code });
        }
        if format < REGISTERED_FORMAT_BASE {
            return Ok(None);
        }
        let index = (format - REGISTERED_FORMAT_BASE) as usize;
        Ok(state.registered.get(index).cloned())
    }
}
