// ClipUtil - Module system
// Bindings Win32 du presse-papiers et de la memoire globale
//
// # Sous-modules
// - `win32` : declarations FFI (types, fonctions extern) et helpers de
//             conversion (to_wstring, from_wstring, last_error)
//
// # Portabilite
// Ce module n'existe que sous Windows. Les bindings sont declares
// manuellement pour eviter toute dependance externe (pas de crate
// windows ou winapi).

/// Declarations FFI Win32 (types, fonctions) et helpers.
#[cfg(windows)]
pub mod win32;
