// ClipUtil - Module format
// Identifiants de formats du presse-papiers et registre de resolution
//
// Ce module fournit deux sous-modules complementaires :
// - `id` : types de base (FormatId, ClipboardFormat, FormatKey). Une
//   FormatKey est l'union etiquetee {Raw, Named, Known} acceptee par
//   toutes les operations qui prennent un format en argument.
// - `registry` : FormatRegistry, qui associe noms symboliques et codes
//   numeriques, y compris les formats enregistres dynamiquement (HTML, RTF)
//   dont l'identifiant n'est stable que pendant une session Windows.
//
// # Portabilite
// Ce module est en pur Rust ; les appels systeme passent par le trait
// `ClipboardBackend`.

/// Types de base des formats du presse-papiers.
pub mod id;
/// Registre de resolution des formats (noms, valeurs, appartenance).
pub mod registry;

pub use id::{ClipboardFormat, FormatId, FormatKey};
pub use registry::FormatRegistry;
