// ClipUtil - Arbre de modules (crate library)
//
// Ce fichier constitue le point d'entree de la crate ClipUtil : sessions
// sur le presse-papiers Windows et generation du document d'echange
// "HTML Format" avec offsets exacts.
//
// # Modules
// - `backend`   : surface de l'API systeme (trait), Win32 et simulation memoire
// - `clipboard` : session, encodage par format, fonctions libres
// - `config`    : parametres de session (Settings)
// - `constants` : constantes globales (formats, drapeaux memoire, en-tete HTML)
// - `error`     : types d'erreur centralises (ClipError, ClipResult)
// - `format`    : identifiants et registre des formats
// - `html`      : generation et lecture du document HTML du presse-papiers
// - `logging`   : installation du subscriber tracing
// - `system`    : bindings Win32 (Windows uniquement)
//
// # Portabilite
// Seuls `backend::win32` et `system` dependent de Windows. Le reste, dont
// le backend memoire, compile sur toutes les plateformes.

/// Surface de l'API systeme et implementations.
pub mod backend;
/// Session du presse-papiers et fonctions libres.
pub mod clipboard;
/// Parametres de session.
pub mod config;
/// Constantes globales.
pub mod constants;
/// Types d'erreur centralises.
pub mod error;
/// Identifiants et registre des formats.
pub mod format;
/// Document HTML du presse-papiers.
pub mod html;
/// Initialisation des logs.
pub mod logging;
/// Bindings Win32.
pub mod system;

pub use backend::{ClipboardBackend, MemoryBackend, MemoryBlock};
pub use clipboard::{
    get_available_formats_with, get_clipboard_with, get_format_name_with, set_clipboard_with,
    Clipboard, ClipboardContent, ClipboardGuard,
};
#[cfg(windows)]
pub use clipboard::{get_available_formats, get_clipboard, get_format_name, set_clipboard};
pub use config::Settings;
pub use error::{ClipError, ClipErrorKind, ClipResult};
pub use format::{ClipboardFormat, FormatId, FormatKey, FormatRegistry};
pub use html::{HeaderStyle, HtmlTemplate, HTML_ENCODING};
pub use logging::init_logging;
