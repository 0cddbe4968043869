// ClipUtil - Contenu et encodage des donnees du presse-papiers
//
// L'encodage est choisi par format, jamais negocie :
// - CF_UNICODETEXT : UTF-16LE + terminateur de 2 octets
// - HTML (code enregistre ou ancienne constante) : document genere par
//   `HtmlTemplate`, UTF-8 + 1 octet de terminateur
// - autres formats : UTF-8 (ou octets bruts) + 1 octet de terminateur
//
// Les blocs sont alloues initialises a zero : le terminateur n'est pas
// ecrit explicitement, seule la taille du bloc le reserve.
//
// # Decodage
// Les blocs lus peuvent etre plus grands que la donnee (arrondi de
// GlobalAlloc ou application tierce). Le texte UTF-16 et HTML est coupe
// au premier NUL (un NUL interne termine donc le texte). Pour les autres
// formats, un payload qui n'est pas de l'UTF-8 valide est retourne tel
// quel : le bloc complet, sans retirer de terminateur (les donnees binaires
// deposees par une autre application n'en ont pas).

use crate::constants::CF_UNICODETEXT;
use crate::error::{ClipError, ClipResult};
use crate::format::{FormatId, FormatRegistry};
use crate::html::{HeaderStyle, HtmlTemplate};

/// Donnees lues ou ecrites dans le presse-papiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    Text(String),
    Bytes(Vec<u8>),
}

impl ClipboardContent {
    /// Texte, si le contenu a ete decode.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ClipboardContent::Text(s) => Some(s),
            ClipboardContent::Bytes(_) => None,
        }
    }

    /// Consomme le contenu et retourne le texte.
    pub fn into_text(self) -> Option<String> {
        match self {
            ClipboardContent::Text(s) => Some(s),
            ClipboardContent::Bytes(_) => None,
        }
    }

    /// Vue en octets (UTF-8 pour du texte).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ClipboardContent::Text(s) => s.as_bytes(),
            ClipboardContent::Bytes(b) => b,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ClipboardContent::Text(_))
    }
}

impl From<&str> for ClipboardContent {
    fn from(s: &str) -> Self {
        ClipboardContent::Text(s.to_string())
    }
}

impl From<String> for ClipboardContent {
    fn from(s: String) -> Self {
        ClipboardContent::Text(s)
    }
}

impl From<Vec<u8>> for ClipboardContent {
    fn from(b: Vec<u8>) -> Self {
        ClipboardContent::Bytes(b)
    }
}

impl From<&[u8]> for ClipboardContent {
    fn from(b: &[u8]) -> Self {
        ClipboardContent::Bytes(b.to_vec())
    }
}

impl PartialEq<&str> for ClipboardContent {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

impl PartialEq<str> for ClipboardContent {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

/// Encodage applique a un format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadEncoding {
    /// UTF-16LE, terminateur de 2 octets
    Utf16,
    /// Document HTML du presse-papiers, UTF-8, terminateur de 1 octet
    Html,
    /// UTF-8 ou octets bruts, terminateur de 1 octet
    Utf8,
}

/// Payload pret a copier dans un bloc de memoire globale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Octets a copier (sans terminateur)
    pub bytes: Vec<u8>,
    /// Taille du bloc a allouer, terminateur compris
    pub block_size: usize,
}

impl PayloadEncoding {
    /// Encodage d'un format donne.
    pub fn for_format(registry: &FormatRegistry, format: FormatId) -> Self {
        if format == CF_UNICODETEXT {
            PayloadEncoding::Utf16
        } else if registry.is_html(format) {
            PayloadEncoding::Html
        } else {
            PayloadEncoding::Utf8
        }
    }

    /// Taille du terminateur en octets.
    pub fn terminator_len(&self) -> usize {
        match self {
            PayloadEncoding::Utf16 => 2,
            PayloadEncoding::Html | PayloadEncoding::Utf8 => 1,
        }
    }

    /// Encode le contenu. Les octets bruts sont transmis sans conversion.
    pub fn encode(&self, content: &ClipboardContent, style: HeaderStyle) -> EncodedPayload {
        let bytes = match (self, content) {
            (_, ClipboardContent::Bytes(b)) => b.clone(),
            (PayloadEncoding::Utf16, ClipboardContent::Text(s)) => {
                s.encode_utf16().flat_map(u16::to_le_bytes).collect()
            }
            (PayloadEncoding::Html, ClipboardContent::Text(s)) => {
                HtmlTemplate::new(s.as_str())
                    .header_style(style)
                    .generate()
                    .into_bytes()
            }
            (PayloadEncoding::Utf8, ClipboardContent::Text(s)) => s.as_bytes().to_vec(),
        };
        let block_size = bytes.len() + self.terminator_len();
        EncodedPayload { bytes, block_size }
    }

    /// Decode le contenu d'un bloc verrouille.
    ///
    /// # Errors
    /// Retourne `ClipError::Get` si un texte UTF-16 ou HTML est invalide.
    pub fn decode(&self, data: &[u8]) -> ClipResult<ClipboardContent> {
        match self {
            PayloadEncoding::Utf16 => {
                let units: Vec<u16> = data
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .take_while(|&unit| unit != 0)
                    .collect();
                String::from_utf16(&units)
                    .map(ClipboardContent::Text)
                    .map_err(|_| ClipError::Get("unicode text is not valid UTF-16".into()))
            }
            PayloadEncoding::Html => {
                let body = strip_terminator(data);
                let end = body.iter().position(|&b| b == 0).unwrap_or(body.len());
                String::from_utf8(body[..end].to_vec())
                    .map(ClipboardContent::Text)
                    .map_err(|_| ClipError::Get("HTML document is not valid UTF-8".into()))
            }
            PayloadEncoding::Utf8 => {
                let body = strip_terminator(data);
                let text_len = body.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
                match std::str::from_utf8(&body[..text_len]) {
                    Ok(text) => Ok(ClipboardContent::Text(text.to_string())),
                    Err(_) => Ok(ClipboardContent::Bytes(data.to_vec())),
                }
            }
        }
    }
}

/// Retire l'octet de terminateur final.
fn strip_terminator(data: &[u8]) -> &[u8] {
    &data[..data.len().saturating_sub(1)]
}
