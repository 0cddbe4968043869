// ClipUtil - Module clipboard
// Sessions sur le presse-papiers systeme
//
// Ce module fournit trois sous-modules complementaires :
// - `session` : la session `Clipboard` (ouverture avec tentatives bornees,
//   verrouillage des blocs, lecture/ecriture par format, fermeture
//   garantie par garde ou par Drop).
// - `content` : contenu lu ou ecrit et encodage par format (UTF-16LE,
//   document HTML, UTF-8 ou octets bruts).
// - `api` : fonctions libres qui ouvrent une session courte.
//
// # Securite
// - Le presse-papiers est toujours referme, y compris sur erreur
// - Le contenu des donnees n'est jamais journalise

/// Fonctions libres sur une session courte.
pub mod api;
/// Contenu et encodage par format.
pub mod content;
/// Session du presse-papiers.
pub mod session;

pub use api::*;
pub use content::{ClipboardContent, EncodedPayload, PayloadEncoding};
pub use session::{Clipboard, ClipboardGuard};
