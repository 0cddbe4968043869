// ClipUtil - Module html
// Document d'echange HTML du presse-papiers ("HTML Format")
//
// Ce module fournit deux sous-modules complementaires :
// - `template` : construit le document a partir du contenu de l'appelant
//   et calcule les offsets en octets de l'en-tete (StartHTML, EndHTML,
//   StartFragment, EndFragment).
// - `header` : relit l'en-tete d'un document existant et extrait le
//   fragment qu'il delimite.
//
// # Format
// ```text
// Version:1.0
// StartHTML:0000000100
// EndHTML:0000000229
// StartFragment:0000000135
// EndFragment:0000000194
// <html>
// <body>
// <!--StartFragment-->
// ...
// <!--EndFragment-->
// </body>
// </html>
// ```
// Les offsets sont des positions absolues dans le document encode en
// UTF-8, sur 10 chiffres completes par des zeros (`HeaderStyle::ZeroPadded`)
// ou en entiers simples (`HeaderStyle::Plain`, ancienne variante).

/// Lecture de l'en-tete et extraction du fragment.
pub mod header;
/// Generation du document HTML du presse-papiers.
pub mod template;

pub use header::{extract_fragment, HtmlHeader};
pub use template::{HeaderStyle, HtmlOffsets, HtmlTemplate};

/// Jeu de caracteres declare pour le document HTML.
pub const HTML_ENCODING: &str = "UTF-8";

/// Commentaire d'ouverture du fragment.
pub const START_FRAGMENT_MARKER: &str = "<!--StartFragment-->";

/// Commentaire de fermeture du fragment.
pub const END_FRAGMENT_MARKER: &str = "<!--EndFragment-->";
