// ClipUtil - Fonctions libres du presse-papiers
//
// Chaque fonction ouvre une session courte, execute une operation puis
// referme le presse-papiers. Les parametres viennent de l'environnement
// (`Settings::from_env`).
//
// Les variantes `*_with` prennent un backend explicite ; les variantes
// sans suffixe utilisent le presse-papiers Win32 (Windows uniquement).
//
// # Format par defaut de get_clipboard
// Sans format explicite, la lecture utilise le premier format enumere
// (format prefere du systeme), ou le format par defaut de la session si
// le presse-papiers est vide.

use crate::backend::{ClipboardBackend, MemoryBlock};
use crate::clipboard::content::ClipboardContent;
use crate::clipboard::session::Clipboard;
use crate::config::Settings;
use crate::error::ClipResult;
use crate::format::{FormatId, FormatKey};

/// Lit le presse-papiers via un backend donne.
///
/// Retourne `Ok(None)` si une erreur a ete journalisee et supprimee
/// (`suppress_errors`).
pub fn get_clipboard_with<B: ClipboardBackend>(
    backend: B,
    format: Option<FormatKey>,
) -> ClipResult<Option<ClipboardContent>> {
    let mut clipboard = Clipboard::with_settings(backend, Settings::from_env())?;
    clipboard.with_open(|c| {
        let key = match format {
            Some(key) => key,
            None => {
                let first = c.available_formats()?.first().copied();
                FormatKey::from(first.unwrap_or_else(|| c.default_format()))
            }
        };
        c.get_as(key)
    })
}

/// Ecrit dans le presse-papiers via un backend donne.
pub fn set_clipboard_with<B: ClipboardBackend>(
    backend: B,
    content: impl Into<ClipboardContent>,
    format: Option<FormatKey>,
) -> ClipResult<Option<MemoryBlock>> {
    let content = content.into();
    let mut clipboard = Clipboard::with_settings(backend, Settings::from_env())?;
    clipboard.with_open(|c| match format {
        Some(key) => c.set_as(content, key),
        None => c.set(content),
    })
}

/// Formats presents sur le presse-papiers, dans l'ordre d'enumeration.
pub fn get_available_formats_with<B: ClipboardBackend>(backend: B) -> ClipResult<Vec<FormatId>> {
    Clipboard::with_settings(backend, Settings::from_env())?.available_formats()
}

/// Nom d'un format par son code.
pub fn get_format_name_with<B: ClipboardBackend>(
    backend: B,
    code: impl Into<FormatId>,
) -> ClipResult<Option<String>> {
    Clipboard::with_settings(backend, Settings::from_env())?.format_name(code)
}

/// Lit le presse-papiers Windows.
#[cfg(windows)]
pub fn get_clipboard(format: Option<FormatKey>) -> ClipResult<Option<ClipboardContent>> {
    get_clipboard_with(crate::backend::SystemBackend::new(), format)
}

/// Ecrit dans le presse-papiers Windows.
#[cfg(windows)]
pub fn set_clipboard(
    content: impl Into<ClipboardContent>,
    format: Option<FormatKey>,
) -> ClipResult<Option<MemoryBlock>> {
    set_clipboard_with(crate::backend::SystemBackend::new(), content, format)
}

/// Formats presents sur le presse-papiers Windows.
#[cfg(windows)]
pub fn get_available_formats() -> ClipResult<Vec<FormatId>> {
    get_available_formats_with(crate::backend::SystemBackend::new())
}

/// Nom d'un format du presse-papiers Windows.
#[cfg(windows)]
pub fn get_format_name(code: impl Into<FormatId>) -> ClipResult<Option<String>> {
    get_format_name_with(crate::backend::SystemBackend::new(), code)
}
