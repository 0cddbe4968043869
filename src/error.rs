// ClipUtil - Types d'erreur centralises
//
// Ce module definit l'enumeration `ClipError` et le type alias
// `ClipResult<T>` utilises dans toute la crate.
//
// # Categories d'erreurs
// - `Open` : le presse-papiers n'a pas pu etre acquis (detenu par un autre processus)
// - `Empty` : EmptyClipboard a echoue alors que la session est ouverte
// - `Lock` : GlobalLock ou GlobalUnlock a echoue sur un bloc memoire
// - `Get` : GetClipboardData ou GlobalSize n'a rien retourne
// - `Set` : allocation ou SetClipboardData a echoue
// - `FormatNotSupported` : format inconnu ou absent du presse-papiers
// - `Os` : erreur API Windows generique (avec code GetLastError)
//
// L'implementation de `Display` formate chaque variante avec un
// prefixe entre crochets pour faciliter le diagnostic dans les logs.

use crate::format::FormatId;

/// Enumeration de toutes les erreurs possibles dans ClipUtil.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipError {
    /// Echec d'acquisition du presse-papiers apres toutes les tentatives
    #[error("[Open] failed to open clipboard after {attempts} attempt(s)")]
    Open { attempts: u32 },
    /// Echec du vidage du presse-papiers
    #[error("[Empty] EmptyClipboard failed")]
    Empty,
    /// Echec de verrouillage/deverrouillage d'un bloc memoire
    #[error("[Lock] {op} failed")]
    Lock { op: &'static str },
    /// Echec de lecture du presse-papiers
    #[error("[Get] {0}")]
    Get(String),
    /// Echec d'ecriture dans le presse-papiers
    #[error("[Set] {0}")]
    Set(String),
    /// Format inconnu ou absent, avec la liste des formats disponibles
    #[error("[Format] {requested} is not a supported clipboard format, choose from {available:?}")]
    FormatNotSupported {
        requested: String,
        available: Vec<FormatId>,
    },
    /// Erreur Win32 API avec code d'erreur
    #[error("[Win32] {op} failed (code={code})")]
    Os { op: &'static str, code: u32 },
}

/// Categorie d'une erreur, independante de son contenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipErrorKind {
    OpenFailure,
    EmptyFailure,
    LockFailure,
    GetFailure,
    SetFailure,
    FormatUnsupported,
    Os,
}

impl ClipError {
    /// Retourne la categorie de l'erreur.
    pub fn kind(&self) -> ClipErrorKind {
        match self {
            ClipError::Open { .. } => ClipErrorKind::OpenFailure,
            ClipError::Empty => ClipErrorKind::EmptyFailure,
            ClipError::Lock { .. } => ClipErrorKind::LockFailure,
            ClipError::Get(_) => ClipErrorKind::GetFailure,
            ClipError::Set(_) => ClipErrorKind::SetFailure,
            ClipError::FormatNotSupported { .. } => ClipErrorKind::FormatUnsupported,
            ClipError::Os { .. } => ClipErrorKind::Os,
        }
    }

    /// Formats disponibles au moment de l'erreur, si l'erreur les transporte.
    pub fn available_formats(&self) -> Option<&[FormatId]> {
        match self {
            ClipError::FormatNotSupported { available, .. } => Some(available),
            _ => None,
        }
    }
}

/// Type Result specialise pour ClipUtil.
pub type ClipResult<T> = Result<T, ClipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefix() {
        let e = ClipError::Open { attempts: 3 };
        assert_eq!(e.to_string(), "[Open] failed to open clipboard after 3 attempt(s)");
        let e = ClipError::Os { op: "GetClipboardFormatNameW", code: 5 };
        assert_eq!(e.to_string(), "[Win32] GetClipboardFormatNameW failed (code=5)");
    }

    #[test]
    fn test_kind_and_available() {
        let e = ClipError::FormatNotSupported {
            requested: "png".into(),
            available: vec![FormatId::new(13), FormatId::new(1)],
        };
        assert_eq!(e.kind(), ClipErrorKind::FormatUnsupported);
        assert_eq!(e.available_formats().map(|f| f.len()), Some(2));
        assert!(e.to_string().contains("png"));
        assert_eq!(ClipError::Empty.available_formats(), None);
        assert_eq!(ClipError::Lock { op: "GlobalLock" }.kind(), ClipErrorKind::LockFailure);
    }
}
