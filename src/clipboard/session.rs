// ClipUtil - Session du presse-papiers
//
// `Clipboard` porte l'etat d'une session sur le presse-papiers systeme :
//
//   Ferme -> Ouvert -> (Verrouille <-> Deverrouille) -> Ferme
//
// # Ouverture
// OpenClipboard est retente au plus `max_open_attempts` fois (3 max) sans
// attente entre les essais ; au-dela, `ClipError::Open` est retourne.
//
// # Ouverture automatique
// Les operations (lecture, ecriture, vidage, enumeration) appelees sur une
// session fermee l'ouvrent, s'executent puis la referment. Une session
// deja ouverte par l'appelant (`open`, `scoped`, `with_open`) reste
// ouverte.
//
// # Fermeture
// `close` deverrouille au mieux le dernier bloc encore verrouille puis
// libere le presse-papiers. Elle est appelee par `Drop`, par le garde de
// `scoped` et par `with_open`, y compris sur erreur.
//
// # Politique de suppression (Settings::suppress_errors)
// - un echec de GlobalUnlock est journalise au lieu d'etre retourne
// - une erreur levee dans `with_open` est journalisee puis avalee
//
// # Concurrence
// Aucune synchronisation interne : une session ne doit pas etre partagee
// entre threads sans serialisation par l'appelant.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use tracing::{debug, error, trace, warn};

use crate::backend::{ClipboardBackend, MemoryBlock};
use crate::clipboard::content::{ClipboardContent, EncodedPayload, PayloadEncoding};
use crate::config::Settings;
use crate::constants::{GHND, MAX_OPEN_ATTEMPTS};
use crate::error::{ClipError, ClipResult};
use crate::format::{ClipboardFormat, FormatId, FormatKey, FormatRegistry};
use crate::html::extract_fragment;

/// Session sur le presse-papiers systeme.
pub struct Clipboard<B: ClipboardBackend> {
    backend: B,
    registry: FormatRegistry,
    settings: Settings,
    default_format: FormatId,
    is_open: bool,
    is_locked: bool,
    last_memory_block: Option<MemoryBlock>,
}

impl<B: ClipboardBackend> Clipboard<B> {
    /// Cree une session fermee avec les parametres par defaut.
    ///
    /// # Errors
    /// Retourne `ClipError::Os` si l'enregistrement des formats echoue.
    pub fn new(backend: B) -> ClipResult<Self> {
        Self::with_settings(backend, Settings::default())
    }

    /// Cree une session fermee et enregistre les formats dynamiques.
    pub fn with_settings(mut backend: B, settings: Settings) -> ClipResult<Self> {
        let registry = FormatRegistry::register(&mut backend)?;
        let default_format = registry.canonicalize(registry.value_of(settings.default_format));
        Ok(Self {
            backend,
            registry,
            settings,
            default_format,
            is_open: false,
            is_locked: false,
            last_memory_block: None,
        })
    }

    /// Change le format utilise quand aucun n'est precise.
    pub fn set_default_format(&mut self, key: impl Into<FormatKey>) -> ClipResult<()> {
        self.default_format = self.resolve_format(key)?;
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn default_format(&self) -> FormatId {
        self.default_format
    }

    /// Dernier bloc verrouille ou transmis au systeme.
    pub fn last_memory_block(&self) -> Option<MemoryBlock> {
        self.last_memory_block
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Acquiert le presse-papiers, avec un nombre borne de tentatives.
    ///
    /// # Errors
    /// Retourne `ClipError::Open` si toutes les tentatives sont refusees.
    pub fn open(&mut self) -> ClipResult<()> {
        if self.is_open {
            return Ok(());
        }
        let attempts = self.settings.max_open_attempts.clamp(1, MAX_OPEN_ATTEMPTS);
        for attempt in 1..=attempts {
            debug!(attempt, "opening clipboard");
            if self.backend.open() {
                self.is_open = true;
                return Ok(());
            }
            // libere un eventuel etat partiel avant de reessayer
            self.backend.close();
            warn!(attempt, attempts, "OpenClipboard denied");
        }
        Err(ClipError::Open { attempts })
    }

    /// Deverrouille au mieux le dernier bloc puis libere le presse-papiers.
    pub fn close(&mut self) {
        if self.is_locked {
            if let Some(block) = self.last_memory_block {
                if !self.backend.unlock(block) {
                    warn!(block = block.as_raw(), "GlobalUnlock failed while closing clipboard");
                }
            }
            self.is_locked = false;
        }
        self.last_memory_block = None;
        if self.is_open {
            debug!("closing clipboard");
            if !self.backend.close() {
                warn!("CloseClipboard failed");
            }
            self.is_open = false;
        }
    }

    /// Ouvre la session et retourne un garde qui la ferme a sa destruction.
    ///
    /// # Errors
    /// Retourne `ClipError::Open` si l'ouverture echoue.
    pub fn scoped(&mut self) -> ClipResult<ClipboardGuard<'_, B>> {
        self.open()?;
        Ok(ClipboardGuard { clipboard: self })
    }

    /// Execute `body` dans une session ouverte, puis ferme toujours.
    ///
    /// Avec `suppress_errors`, une erreur de `body` est journalisee et
    /// `Ok(None)` est retourne. Un echec d'ouverture est toujours propage.
    pub fn with_open<T, F>(&mut self, body: F) -> ClipResult<Option<T>>
    where
        F: FnOnce(&mut Self) -> ClipResult<T>,
    {
        self.open()?;
        let result = body(self);
        self.close();
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if self.settings.suppress_errors => {
                error!(error = %e, "error in clipboard session suppressed");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Garde et dispatch : ouvre si besoin, execute, ferme si ouvert ici.
    fn auto_open<T, F>(&mut self, op: F) -> ClipResult<T>
    where
        F: FnOnce(&mut Self) -> ClipResult<T>,
    {
        if self.is_open {
            return op(self);
        }
        self.open()?;
        let result = op(self);
        self.close();
        result
    }

    /// Formats presents, dans l'ordre d'enumeration du systeme.
    pub fn available_formats(&mut self) -> ClipResult<Vec<FormatId>> {
        self.auto_open(|c| Ok(c.enumerate_formats()))
    }

    fn enumerate_formats(&mut self) -> Vec<FormatId> {
        let mut formats = Vec::new();
        let mut seen = HashSet::new();
        let mut current = 0;
        loop {
            current = self.backend.enum_formats(current);
            if current == 0 || !seen.insert(current) {
                break;
            }
            formats.push(FormatId::new(current));
        }
        trace!(count = formats.len(), "enumerated clipboard formats");
        formats
    }

    /// Resout un format ; un nom inconnu liste les formats disponibles.
    pub fn resolve_format(&mut self, key: impl Into<FormatKey>) -> ClipResult<FormatId> {
        let key = key.into();
        let registry = self.registry;
        let id = registry.resolve(&key, || self.available_formats())?;
        trace!(%key, format = %id, "resolved clipboard format");
        Ok(id)
    }

    /// Lit le presse-papiers dans le format par defaut.
    pub fn get(&mut self) -> ClipResult<ClipboardContent> {
        let format = self.default_format;
        self.get_as(format)
    }

    /// Lit le presse-papiers dans un format donne.
    ///
    /// # Errors
    /// - `ClipError::FormatNotSupported` si le format est inconnu ou absent
    /// - `ClipError::Get` si le systeme ne fournit pas de donnees
    /// - `ClipError::Lock` si le bloc ne peut pas etre verrouille
    pub fn get_as(&mut self, key: impl Into<FormatKey>) -> ClipResult<ClipboardContent> {
        let key = key.into();
        self.auto_open(|c| c.read_format(&key))
    }

    /// Lecture indexee par format.
    pub fn get_item(&mut self, key: impl Into<FormatKey>) -> ClipResult<ClipboardContent> {
        self.get_as(key)
    }

    fn read_format(&mut self, key: &FormatKey) -> ClipResult<ClipboardContent> {
        let format = self.resolve_format(key.clone())?;
        let available = self.enumerate_formats();
        if !available.contains(&format) {
            return Err(ClipError::FormatNotSupported {
                requested: key.to_string(),
                available,
            });
        }

        debug!(format = %format, "getting clipboard data");
        let block = self.backend.get_data(format.get()).ok_or_else(|| {
            ClipError::Get(format!("GetClipboardData returned no data for format {}", format))
        })?;
        if !self.backend.lock(block) {
            return Err(ClipError::Lock { op: "GlobalLock" });
        }
        self.last_memory_block = Some(block);
        self.is_locked = true;

        let result = self.read_locked(block, format);
        let released = self.release(block);
        let content = result?;
        released?;
        Ok(content)
    }

    fn read_locked(&self, block: MemoryBlock, format: FormatId) -> ClipResult<ClipboardContent> {
        let size = self.backend.size(block);
        if size == 0 {
            return Err(ClipError::Get(format!("GlobalSize returned 0 for format {}", format)));
        }
        let data = self
            .backend
            .read(block)
            .ok_or_else(|| ClipError::Get("locked block is not readable".into()))?;
        trace!(size, format = %format, "read clipboard block");
        PayloadEncoding::for_format(&self.registry, format).decode(&data)
    }

    /// Deverrouille un bloc selon la politique de suppression.
    fn release(&mut self, block: MemoryBlock) -> ClipResult<()> {
        if self.backend.unlock(block) {
            self.is_locked = false;
            return Ok(());
        }
        if self.settings.suppress_errors {
            warn!(block = block.as_raw(), "GlobalUnlock failed, lock count may be inconsistent");
            Ok(())
        } else {
            Err(ClipError::Lock { op: "GlobalUnlock" })
        }
    }

    /// Ecrit dans le format par defaut.
    pub fn set(&mut self, content: impl Into<ClipboardContent>) -> ClipResult<MemoryBlock> {
        let format = self.default_format;
        self.set_as(content, format)
    }

    /// Vide le presse-papiers puis ecrit dans un format donne.
    ///
    /// Retourne le handle transmis au systeme.
    ///
    /// # Errors
    /// - `ClipError::FormatNotSupported` si le nom de format est inconnu
    /// - `ClipError::Empty` si le vidage echoue
    /// - `ClipError::Lock` si le bloc ne peut pas etre verrouille
    /// - `ClipError::Set` si l'allocation ou SetClipboardData echoue
    pub fn set_as(
        &mut self,
        content: impl Into<ClipboardContent>,
        key: impl Into<FormatKey>,
    ) -> ClipResult<MemoryBlock> {
        let content = content.into();
        let key = key.into();
        self.auto_open(|c| c.write_format(&key, &content))
    }

    /// Ecriture indexee par format.
    pub fn set_item(
        &mut self,
        key: impl Into<FormatKey>,
        content: impl Into<ClipboardContent>,
    ) -> ClipResult<MemoryBlock> {
        self.set_as(content, key)
    }

    /// Ecrit des octets bruts, sans conversion, suivis d'un terminateur.
    pub fn set_bytes(&mut self, bytes: &[u8], key: impl Into<FormatKey>) -> ClipResult<MemoryBlock> {
        self.set_as(ClipboardContent::Bytes(bytes.to_vec()), key)
    }

    fn write_format(&mut self, key: &FormatKey, content: &ClipboardContent) -> ClipResult<MemoryBlock> {
        let format = self.resolve_format(key.clone())?;
        self.empty_open()?;
        let payload = PayloadEncoding::for_format(&self.registry, format)
            .encode(content, self.settings.header_style);
        debug!(format = %format, size = payload.block_size, "setting clipboard data");
        self.store(format, &payload)
    }

    /// Alloue, remplit et transmet un bloc au systeme.
    fn store(&mut self, format: FormatId, payload: &EncodedPayload) -> ClipResult<MemoryBlock> {
        let block = self
            .backend
            .alloc(GHND, payload.block_size)
            .ok_or_else(|| ClipError::Set(format!("GlobalAlloc failed ({} bytes)", payload.block_size)))?;
        if !self.backend.lock(block) {
            self.backend.free(block);
            return Err(ClipError::Lock { op: "GlobalLock" });
        }
        self.last_memory_block = Some(block);
        self.is_locked = true;

        let written = self.backend.write(block, &payload.bytes);
        if let Err(e) = self.release(block) {
            self.discard(block);
            return Err(e);
        }
        if !written {
            self.discard(block);
            return Err(ClipError::Set("failed to copy data into global memory".into()));
        }

        match self.backend.set_data(format.get(), block) {
            Some(handle) => {
                trace!(format = %format, "clipboard data set");
                Ok(handle)
            }
            None => {
                self.discard(block);
                Err(ClipError::Set(format!("SetClipboardData failed for format {}", format)))
            }
        }
    }

    /// Libere un bloc qui n'a pas ete transmis au systeme.
    fn discard(&mut self, block: MemoryBlock) {
        self.backend.free(block);
        self.is_locked = false;
        self.last_memory_block = None;
    }

    /// Vide le presse-papiers.
    ///
    /// # Errors
    /// Retourne `ClipError::Empty` si EmptyClipboard echoue.
    pub fn empty(&mut self) -> ClipResult<()> {
        self.auto_open(|c| c.empty_open())
    }

    fn empty_open(&mut self) -> ClipResult<()> {
        debug!("emptying clipboard");
        if !self.backend.empty() {
            return Err(ClipError::Empty);
        }
        Ok(())
    }

    /// Nom d'un format par son code (None si le code n'a pas de nom).
    pub fn format_name(&self, code: impl Into<FormatId>) -> ClipResult<Option<String>> {
        self.registry.name_of(&self.backend, code.into())
    }

    /// Fragment du document HTML present sur le presse-papiers.
    pub fn get_html_fragment(&mut self) -> ClipResult<Option<String>> {
        let content = self.get_as(ClipboardFormat::Html)?;
        Ok(content
            .as_text()
            .and_then(extract_fragment)
            .map(str::to_string))
    }
}

impl<B: ClipboardBackend> Drop for Clipboard<B> {
    fn drop(&mut self) {
        if self.is_open || self.is_locked {
            self.close();
        }
    }
}

/// Session ouverte, fermee a la destruction du garde.
pub struct ClipboardGuard<'a, B: ClipboardBackend> {
    clipboard: &'a mut Clipboard<B>,
}

impl<B: ClipboardBackend> Deref for ClipboardGuard<'_, B> {
    type Target = Clipboard<B>;

    fn deref(&self) -> &Self::Target {
        self.clipboard
    }
}

impl<B: ClipboardBackend> DerefMut for ClipboardGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.clipboard
    }
}

impl<B: ClipboardBackend> Drop for ClipboardGuard<'_, B> {
    fn drop(&mut self) {
        self.clipboard.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::constants::*;
    use crate::error::ClipErrorKind;
    use pretty_assertions::assert_eq;

    const HTML: u32 = REGISTERED_FORMAT_BASE;
    const RTF: u32 = REGISTERED_FORMAT_BASE + 1;

    fn session() -> (MemoryBackend, Clipboard<MemoryBackend>) {
        let mem = MemoryBackend::new();
        let clip = Clipboard::new(mem.handle()).unwrap();
        (mem, clip)
    }

    fn strict() -> Settings {
        Settings::default().suppress_errors(false)
    }

    /// Chaines ASCII imprimables de longueur 1..=100 (generateur lineaire).
    fn printable_strings(count: usize) -> Vec<String> {
        let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
        let mut next = move || {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (seed >> 33) as u32
        };
        (0..count)
            .map(|_| {
                let len = 1 + (next() % 100) as usize;
                (0..len).map(|_| char::from(0x20 + (next() % 95) as u8)).collect()
            })
            .collect()
    }

    #[test]
    fn test_unicode_roundtrip_printable_ascii() {
        let (_mem, mut clip) = session();
        for s in printable_strings(200) {
            clip.set_as(s.as_str(), CF_UNICODETEXT).unwrap();
            assert_eq!(clip.get_as(CF_UNICODETEXT).unwrap(), s.as_str());
        }
    }

    #[test]
    fn test_set_then_get_uses_default_format() {
        let (mem, mut clip) = session();
        assert_eq!(clip.default_format(), CF_UNICODETEXT);
        clip.set("hi").unwrap();
        assert_eq!(mem.formats(), vec![CF_UNICODETEXT]);
        assert_eq!(mem.peek(CF_UNICODETEXT).unwrap(), vec![b'h', 0, b'i', 0, 0, 0]);
        assert_eq!(clip.get().unwrap(), "hi");
    }

    #[test]
    fn test_auto_open_leaves_clipboard_closed() {
        let (mem, mut clip) = session();
        clip.set("x").unwrap();
        assert!(!clip.is_open());
        assert!(!mem.is_held_by_anyone());
        clip.get().unwrap();
        clip.available_formats().unwrap();
        clip.empty().unwrap();
        assert!(!clip.is_open());
        assert!(!clip.is_locked());
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_unsupported_format_lists_available() {
        let (mem, mut clip) = session();
        mem.seed(CF_TEXT, b"abc\0");
        let err = clip.get().unwrap_err();
        assert_eq!(err.kind(), ClipErrorKind::FormatUnsupported);
        assert_eq!(err.available_formats(), Some(&[FormatId::new(CF_TEXT)][..]));

        let err = clip.get_as("png").unwrap_err();
        assert_eq!(
            err,
            ClipError::FormatNotSupported {
                requested: "png".into(),
                available: vec![FormatId::new(CF_TEXT)],
            }
        );
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_available_formats_order_and_termination() {
        let (mem, mut clip) = session();
        assert_eq!(clip.available_formats().unwrap(), Vec::<FormatId>::new());
        mem.seed(CF_UNICODETEXT, b"a\0\0\0");
        mem.seed(CF_LOCALE, &[9, 4, 0, 0]);
        mem.seed(CF_TEXT, b"a\0");
        let formats = clip.available_formats().unwrap();
        assert_eq!(formats, vec![CF_UNICODETEXT, CF_LOCALE, CF_TEXT].into_iter().map(FormatId::new).collect::<Vec<_>>());
        assert!(clip.registry().contains(&FormatKey::from(formats[0])));
    }

    #[test]
    fn test_open_retries_transient_denial() {
        let (mem, mut clip) = session();
        mem.faults(|f| f.deny_open = 2);
        clip.open().unwrap();
        assert!(clip.is_open());
        assert!(clip.backend().is_held());
        clip.close();
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_open_fails_after_three_attempts() {
        let (mem, mut clip) = session();
        mem.faults(|f| f.deny_open = 3);
        assert_eq!(clip.open().unwrap_err(), ClipError::Open { attempts: 3 });
        assert!(!clip.is_open());

        let mut other = mem.handle();
        assert!(other.open());
        let err = clip.get().unwrap_err();
        assert_eq!(err.kind(), ClipErrorKind::OpenFailure);
        assert!(other.is_held());
    }

    #[test]
    fn test_open_attempts_setting() {
        let mem = MemoryBackend::new();
        let settings = Settings::default().max_open_attempts(1);
        let mut clip = Clipboard::with_settings(mem.handle(), settings).unwrap();
        mem.faults(|f| f.deny_open = 1);
        assert_eq!(clip.open().unwrap_err(), ClipError::Open { attempts: 1 });
        clip.open().unwrap();
    }

    #[test]
    fn test_scoped_guard_closes_on_drop() {
        let (mem, mut clip) = session();
        {
            let mut guard = clip.scoped().unwrap();
            guard.set("scoped").unwrap();
            // la session reste ouverte entre les operations
            assert!(guard.is_open());
            assert_eq!(guard.get().unwrap(), "scoped");
            assert!(mem.is_held_by_anyone());
        }
        assert!(!clip.is_open());
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_drop_closes_session() {
        let mem = MemoryBackend::new();
        {
            let mut clip = Clipboard::new(mem.handle()).unwrap();
            clip.open().unwrap();
            assert!(mem.is_held_by_anyone());
        }
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_with_open_suppresses_errors() {
        let (mem, mut clip) = session();
        let result = clip.with_open(|c| c.get_as("png")).unwrap();
        assert_eq!(result, None);
        assert!(!clip.is_open());
        assert!(!mem.is_held_by_anyone());

        let value = clip.with_open(|c| c.set("ok").map(|_| 7)).unwrap();
        assert_eq!(value, Some(7));
    }

    #[test]
    fn test_with_open_propagates_when_strict() {
        let mem = MemoryBackend::new();
        let mut clip = Clipboard::with_settings(mem.handle(), strict()).unwrap();
        let err = clip.with_open(|c| c.get_as("png")).unwrap_err();
        assert_eq!(err.kind(), ClipErrorKind::FormatUnsupported);
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_with_open_propagates_open_failure() {
        let (mem, mut clip) = session();
        mem.faults(|f| f.deny_open = 3);
        let err = clip.with_open(|c| c.get()).unwrap_err();
        assert_eq!(err.kind(), ClipErrorKind::OpenFailure);
    }

    #[test]
    fn test_unlock_failure_swallowed_by_default() {
        let (mem, mut clip) = session();
        let handle = clip.set("keep").unwrap();
        mem.faults(|f| f.fail_unlock = true);
        assert_eq!(clip.get().unwrap(), "keep");
        // le verrou reste compte cote systeme
        assert_eq!(mem.lock_count(handle), Some(1));
        assert!(!clip.is_locked());
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_unlock_failure_raised_when_strict() {
        let mem = MemoryBackend::new();
        let mut clip = Clipboard::with_settings(mem.handle(), strict()).unwrap();
        clip.set("keep").unwrap();
        mem.faults(|f| f.fail_unlock = true);
        assert_eq!(clip.get().unwrap_err(), ClipError::Lock { op: "GlobalUnlock" });
        assert_eq!(clip.set("new").unwrap_err(), ClipError::Lock { op: "GlobalUnlock" });
        // le bloc non transmis est libere
        assert_eq!(mem.live_blocks(), 0);
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_lock_failure_frees_block() {
        let (mem, mut clip) = session();
        mem.faults(|f| f.fail_lock = true);
        assert_eq!(clip.set("x").unwrap_err(), ClipError::Lock { op: "GlobalLock" });
        assert_eq!(mem.live_blocks(), 0);

        mem.faults(|f| f.fail_lock = false);
        clip.set("x").unwrap();
        mem.faults(|f| f.fail_lock = true);
        assert_eq!(clip.get().unwrap_err().kind(), ClipErrorKind::LockFailure);
        assert!(!clip.is_locked());
    }

    #[test]
    fn test_set_failure_frees_block() {
        let (mem, mut clip) = session();
        mem.faults(|f| f.fail_set = true);
        assert_eq!(clip.set("x").unwrap_err().kind(), ClipErrorKind::SetFailure);
        assert_eq!(mem.live_blocks(), 0);
        assert_eq!(clip.last_memory_block(), None);

        mem.faults(|f| {
            f.fail_set = false;
            f.fail_alloc = true;
        });
        assert_eq!(clip.set("x").unwrap_err().kind(), ClipErrorKind::SetFailure);
    }

    #[test]
    fn test_empty_failure() {
        let (mem, mut clip) = session();
        mem.faults(|f| f.fail_empty = true);
        assert_eq!(clip.empty().unwrap_err(), ClipError::Empty);
        assert_eq!(clip.set("x").unwrap_err(), ClipError::Empty);
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_set_empties_previous_formats() {
        let (mem, mut clip) = session();
        mem.seed(CF_TEXT, b"old\0");
        mem.seed(RTF, b"{\\rtf1 old}\0");
        clip.set("new").unwrap();
        assert_eq!(mem.formats(), vec![CF_UNICODETEXT]);
        assert_eq!(mem.live_blocks(), 1);
    }

    #[test]
    fn test_empty_block_is_get_failure() {
        let (mem, mut clip) = session();
        mem.seed(CF_TEXT, b"");
        let err = clip.get_as(CF_TEXT).unwrap_err();
        assert_eq!(err.kind(), ClipErrorKind::GetFailure);
        assert!(!clip.is_locked());
    }

    #[test]
    fn test_html_set_and_get() {
        let (mem, mut clip) = session();
        clip.set_as("<h1>Hello World</h1>", "html").unwrap();
        assert_eq!(mem.formats(), vec![HTML]);

        let stored = mem.peek(HTML).unwrap();
        assert_eq!(stored.last(), Some(&0));
        let document = clip.get_as(ClipboardFormat::Html).unwrap().into_text().unwrap();
        assert!(document.starts_with("Version:1.0\nStartHTML:"));
        assert_eq!(document.len() + 1, stored.len());

        // ancienne constante et alias resolvent vers le meme format
        assert_eq!(clip.get_as(HTML_FORMAT_LEGACY).unwrap(), document.as_str());
        assert_eq!(clip.get_item("CF_HTML").unwrap(), document.as_str());
        assert_eq!(clip.get_html_fragment().unwrap(), Some("<h1>Hello World</h1>".to_string()));
    }

    #[test]
    fn test_html_plain_header_style() {
        let mem = MemoryBackend::new();
        let settings = Settings::default().header_style(crate::html::HeaderStyle::Plain);
        let mut clip = Clipboard::with_settings(mem.handle(), settings).unwrap();
        clip.set_item("HTML", "<p>plain</p>").unwrap();
        let document = clip.get_as("HTML").unwrap().into_text().unwrap();
        assert!(!document.contains("StartHTML:0"));
        assert_eq!(clip.get_html_fragment().unwrap().as_deref(), Some("<p>plain</p>"));
    }

    #[test]
    fn test_rtf_roundtrip() {
        let (mem, mut clip) = session();
        clip.set_as("{\\rtf1 hello}", "rtf").unwrap();
        assert_eq!(mem.peek(RTF).unwrap(), b"{\\rtf1 hello}\0".to_vec());
        assert_eq!(clip.get_as(ClipboardFormat::Rtf).unwrap(), "{\\rtf1 hello}");
    }

    #[test]
    fn test_bytes_passthrough() {
        let (mem, mut clip) = session();
        let custom = mem.handle().register_format("Custom Binary").unwrap();
        clip.set_bytes(&[0xFF, 0x00, 0x01], custom).unwrap();
        assert_eq!(mem.peek(custom).unwrap(), vec![0xFF, 0x00, 0x01, 0x00]);
        // octets bruts : le bloc complet, terminateur compris
        assert_eq!(
            clip.get_as(custom).unwrap(),
            ClipboardContent::Bytes(vec![0xFF, 0x00, 0x01, 0x00])
        );
        assert_eq!(clip.format_name(custom).unwrap().as_deref(), Some("Custom Binary"));
    }

    #[test]
    fn test_foreign_binary_without_terminator() {
        let (mem, mut clip) = session();
        let custom = mem.handle().register_format("PNG").unwrap();
        mem.seed(custom, &[0x89, b'P', b'N', b'G']);
        assert_eq!(
            clip.get_as(custom).unwrap(),
            ClipboardContent::Bytes(vec![0x89, b'P', b'N', b'G'])
        );
    }

    #[test]
    fn test_unicode_text_ends_at_inner_nul() {
        let (mem, mut clip) = session();
        clip.set("a\0b").unwrap();
        assert_eq!(mem.peek(CF_UNICODETEXT).unwrap(), vec![b'a', 0, 0, 0, b'b', 0, 0, 0]);
        assert_eq!(clip.get().unwrap(), "a");
    }

    #[test]
    fn test_enumeration_stops_on_cycle() {
        let (mem, mut clip) = session();
        mem.seed(CF_UNICODETEXT, b"a\0\0\0");
        mem.seed(CF_TEXT, b"a\0");
        mem.faults(|f| f.enum_cycle = true);
        assert_eq!(
            clip.available_formats().unwrap(),
            vec![FormatId::new(CF_UNICODETEXT), FormatId::new(CF_TEXT)]
        );
        assert!(!mem.is_held_by_anyone());
    }

    #[test]
    fn test_foreign_unicode_block_with_padding() {
        let (mem, mut clip) = session();
        mem.seed(CF_UNICODETEXT, &[b'o', 0, b'k', 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(clip.get().unwrap(), "ok");
    }

    #[test]
    fn test_default_format_from_settings() {
        let mem = MemoryBackend::new();
        let settings = Settings::default().default_format(ClipboardFormat::HtmlLegacy);
        let mut clip = Clipboard::with_settings(mem.handle(), settings).unwrap();
        // l'ancienne constante est remplacee par le code enregistre
        assert_eq!(clip.default_format(), HTML);
        clip.set("<i>x</i>").unwrap();
        assert_eq!(mem.formats(), vec![HTML]);

        clip.set_default_format("rtf").unwrap();
        assert_eq!(clip.default_format(), RTF);
        assert_eq!(
            clip.set_default_format("png").unwrap_err().kind(),
            ClipErrorKind::FormatUnsupported
        );
    }

    #[test]
    fn test_format_name() {
        let (_mem, clip) = session();
        assert_eq!(clip.format_name(CF_UNICODETEXT).unwrap().as_deref(), Some("CF_UNICODETEXT"));
        assert_eq!(clip.format_name(HTML).unwrap().as_deref(), Some("CF_HTML"));
        assert_eq!(clip.format_name(999u32).unwrap(), None);
    }

    #[test]
    fn test_locked_state_tracks_operations() {
        let (_mem, mut clip) = session();
        clip.open().unwrap();
        let handle = clip.set("state").unwrap();
        assert!(!clip.is_locked());
        assert_eq!(clip.last_memory_block(), Some(handle));
        clip.close();
        assert_eq!(clip.last_memory_block(), None);
        assert!(!clip.is_open());
    }
}
