// ClipUtil - Types de formats du presse-papiers
//
// `FormatId` est un identifiant numerique opaque. Certains sont reserves
// par le systeme (CF_TEXT=1, CF_UNICODETEXT=13, CF_LOCALE=16), d'autres
// sont enregistres au demarrage (HTML, RTF) et ne doivent jamais etre
// persistes d'une session Windows a l'autre.
//
// `ClipboardFormat` enumere les formats connus de la crate. Les alias
// historiques (`text`, `html`, `HTML`, `rtf`) sont resolus par nom vers
// un membre canonique.

use std::fmt;

/// Identifiant numerique d'un format du presse-papiers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatId(u32);

impl FormatId {
    /// Cree un identifiant a partir de sa valeur brute.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Valeur brute transmise aux APIs Win32.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FormatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FormatId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl PartialEq<u32> for FormatId {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

/// Formats connus de la crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipboardFormat {
    /// CF_TEXT
    Text,
    /// CF_UNICODETEXT
    UnicodeText,
    /// CF_LOCALE
    Locale,
    /// "HTML Format", enregistre dynamiquement
    Html,
    /// "Rich Text Format", enregistre dynamiquement
    Rtf,
    /// Ancienne constante HTML (49418)
    HtmlLegacy,
}

/// Table des noms acceptes, dans l'ordre de declaration.
/// Le premier nom d'un membre est son nom canonique.
pub(crate) const FORMAT_NAMES: &[(&str, ClipboardFormat)] = &[
    ("CF_TEXT", ClipboardFormat::Text),
    ("CF_UNICODETEXT", ClipboardFormat::UnicodeText),
    ("CF_LOCALE", ClipboardFormat::Locale),
    ("CF_HTML", ClipboardFormat::Html),
    ("CF_RTF", ClipboardFormat::Rtf),
    ("HTML_Format", ClipboardFormat::HtmlLegacy),
    ("text", ClipboardFormat::UnicodeText),
    ("html", ClipboardFormat::HtmlLegacy),
    ("HTML", ClipboardFormat::HtmlLegacy),
    ("rtf", ClipboardFormat::Rtf),
];

impl ClipboardFormat {
    /// Tous les membres, dans l'ordre de declaration.
    pub const ALL: [ClipboardFormat; 6] = [
        ClipboardFormat::Text,
        ClipboardFormat::UnicodeText,
        ClipboardFormat::Locale,
        ClipboardFormat::Html,
        ClipboardFormat::Rtf,
        ClipboardFormat::HtmlLegacy,
    ];

    /// Recherche un membre par nom (sensible a la casse, alias compris).
    pub fn from_name(name: &str) -> Option<Self> {
        FORMAT_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| *f)
    }

    /// Nom canonique du membre.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "CF_TEXT",
            Self::UnicodeText => "CF_UNICODETEXT",
            Self::Locale => "CF_LOCALE",
            Self::Html => "CF_HTML",
            Self::Rtf => "CF_RTF",
            Self::HtmlLegacy => "HTML_Format",
        }
    }
}

impl fmt::Display for ClipboardFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Format demande par l'appelant : entier brut, nom symbolique ou membre connu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatKey {
    Raw(u32),
    Named(String),
    Known(ClipboardFormat),
}

impl fmt::Display for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatKey::Raw(v) => write!(f, "{}", v),
            FormatKey::Named(n) => f.write_str(n),
            FormatKey::Known(k) => write!(f, "{}", k),
        }
    }
}

impl From<u32> for FormatKey {
    fn from(v: u32) -> Self {
        FormatKey::Raw(v)
    }
}

impl From<FormatId> for FormatKey {
    fn from(v: FormatId) -> Self {
        FormatKey::Raw(v.get())
    }
}

impl From<&str> for FormatKey {
    fn from(v: &str) -> Self {
        FormatKey::Named(v.to_string())
    }
}

impl From<String> for FormatKey {
    fn from(v: String) -> Self {
        FormatKey::Named(v)
    }
}

impl From<ClipboardFormat> for FormatKey {
    fn from(v: ClipboardFormat) -> Self {
        FormatKey::Known(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(ClipboardFormat::from_name("text"), Some(ClipboardFormat::UnicodeText));
        assert_eq!(ClipboardFormat::from_name("HTML"), Some(ClipboardFormat::HtmlLegacy));
        assert_eq!(ClipboardFormat::from_name("rtf"), Some(ClipboardFormat::Rtf));
        assert_eq!(ClipboardFormat::from_name("CF_HTML"), Some(ClipboardFormat::Html));
        // sensible a la casse
        assert_eq!(ClipboardFormat::from_name("Text"), None);
        assert_eq!(ClipboardFormat::from_name("png"), None);
    }

    #[test]
    fn test_canonical_names_roundtrip() {
        for f in ClipboardFormat::ALL {
            assert_eq!(ClipboardFormat::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn test_format_key_conversions() {
        assert_eq!(FormatKey::from(13u32), FormatKey::Raw(13));
        assert_eq!(FormatKey::from("html"), FormatKey::Named("html".into()));
        assert_eq!(FormatKey::from(FormatId::new(16)), FormatKey::Raw(16));
        assert_eq!(FormatKey::from(ClipboardFormat::Rtf).to_string(), "CF_RTF");
        assert_eq!(format!("{:?}", vec![FormatId::new(1), FormatId::new(13)]), "[1, 13]");
    }
}
