// ClipUtil - Registre des formats
//
// `FormatRegistry` associe les noms symboliques aux codes numeriques.
// Les formats HTML et RTF sont enregistres aupres du systeme a la
// creation du registre (RegisterClipboardFormatW) ; leurs codes ne sont
// valables que pour la session Windows courante.
//
// # Resolution
// `resolve` accepte une FormatKey (entier brut, nom, membre connu).
// Un nom inconnu produit `ClipError::FormatNotSupported` avec la liste
// des formats actuellement disponibles (fournie par la session).
// L'ancienne constante HTML (49418) est toujours remplacee par le code
// HTML enregistre.
//
// # Noms
// `name_of` repond directement pour les formats connus et interroge la
// table systeme pour les autres. Un code sans nom ou invalide donne None,
// toute autre erreur systeme est propagee.

use tracing::debug;

use crate::backend::ClipboardBackend;
use crate::constants::*;
use crate::error::{ClipError, ClipResult};
use crate::format::id::{ClipboardFormat, FormatId, FormatKey, FORMAT_NAMES};

/// Registre des formats connus pour la session Windows courante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRegistry {
    html: FormatId,
    rtf: FormatId,
}

impl FormatRegistry {
    /// Enregistre les formats dynamiques (HTML, RTF) aupres du systeme.
    ///
    /// # Errors
    /// Retourne `ClipError::Os` si RegisterClipboardFormatW echoue.
    pub fn register<B: ClipboardBackend + ?Sized>(backend: &mut B) -> ClipResult<Self> {
        let html = backend.register_format(HTML_FORMAT_NAME)?;
        let rtf = backend.register_format(RTF_FORMAT_NAME)?;
        debug!(html, rtf, "registered dynamic clipboard formats");
        Ok(Self::with_ids(FormatId::new(html), FormatId::new(rtf)))
    }

    /// Cree un registre a partir de codes deja enregistres.
    pub const fn with_ids(html: FormatId, rtf: FormatId) -> Self {
        Self { html, rtf }
    }

    /// Code numerique d'un membre connu.
    pub fn value_of(&self, format: ClipboardFormat) -> FormatId {
        match format {
            ClipboardFormat::Text => FormatId::new(CF_TEXT),
            ClipboardFormat::UnicodeText => FormatId::new(CF_UNICODETEXT),
            ClipboardFormat::Locale => FormatId::new(CF_LOCALE),
            ClipboardFormat::Html => self.html,
            ClipboardFormat::Rtf => self.rtf,
            ClipboardFormat::HtmlLegacy => FormatId::new(HTML_FORMAT_LEGACY),
        }
    }

    /// Premier membre (ordre de declaration) portant ce code.
    pub fn member_of(&self, id: FormatId) -> Option<ClipboardFormat> {
        ClipboardFormat::ALL
            .into_iter()
            .find(|f| self.value_of(*f) == id)
    }

    /// Tous les noms acceptes, alias compris.
    pub fn names() -> Vec<&'static str> {
        FORMAT_NAMES.iter().map(|(n, _)| *n).collect()
    }

    /// Codes de tous les membres, dans l'ordre de declaration.
    pub fn values(&self) -> Vec<FormatId> {
        ClipboardFormat::ALL.into_iter().map(|f| self.value_of(f)).collect()
    }

    /// Remplace l'ancienne constante HTML par le code HTML enregistre.
    pub fn canonicalize(&self, id: FormatId) -> FormatId {
        if id == HTML_FORMAT_LEGACY {
            self.html
        } else {
            id
        }
    }

    /// Vrai si le code designe l'une des deux constantes HTML.
    pub fn is_html(&self, id: FormatId) -> bool {
        id == self.html || id == HTML_FORMAT_LEGACY
    }

    /// Resolution sans effet de bord : None si le nom est inconnu.
    pub fn lookup(&self, key: &FormatKey) -> Option<FormatId> {
        let id = match key {
            FormatKey::Raw(v) => FormatId::new(*v),
            FormatKey::Known(f) => self.value_of(*f),
            FormatKey::Named(n) => self.value_of(ClipboardFormat::from_name(n)?),
        };
        Some(self.canonicalize(id))
    }

    /// Resout une FormatKey en code numerique.
    ///
    /// `available` n'est appele qu'en cas d'echec, pour lister les formats
    /// presents sur le presse-papiers dans l'erreur.
    ///
    /// # Errors
    /// - `ClipError::FormatNotSupported` si le nom est inconnu
    /// - toute erreur retournee par `available` (ouverture, etc.)
    pub fn resolve<F>(&self, key: &FormatKey, available: F) -> ClipResult<FormatId>
    where
        F: FnOnce() -> ClipResult<Vec<FormatId>>,
    {
        match self.lookup(key) {
            Some(id) => Ok(id),
            None => {
                let available = available()?;
                Err(ClipError::FormatNotSupported {
                    requested: key.to_string(),
                    available,
                })
            }
        }
    }

    /// Test d'appartenance : nom connu, valeur connue ou membre.
    pub fn contains(&self, key: &FormatKey) -> bool {
        match key {
            FormatKey::Known(_) => true,
            FormatKey::Named(n) => ClipboardFormat::from_name(n).is_some(),
            FormatKey::Raw(v) => self.member_of(FormatId::new(*v)).is_some(),
        }
    }

    /// Nom d'un format par son code.
    ///
    /// Les formats connus repondent par leur nom canonique ; les autres
    /// sont recherches dans la table systeme.
    ///
    /// # Errors
    /// Retourne `ClipError::Os` si la recherche systeme echoue pour une
    /// autre raison qu'un code sans nom ou invalide.
    pub fn name_of<B: ClipboardBackend + ?Sized>(
        &self,
        backend: &B,
        code: FormatId,
    ) -> ClipResult<Option<String>> {
        if let Some(member) = self.member_of(code) {
            return Ok(Some(member.name().to_string()));
        }
        backend.format_name(code.get())
    }
}
