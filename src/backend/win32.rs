// ClipUtil - Backend Win32
// Implementation de `ClipboardBackend` par appels FFI directs.
//
// Chaque methode isole son appel FFI dans un bloc unsafe local.
// Les pointeurs retournes par GlobalLock sont conserves par handle
// jusqu'au GlobalUnlock correspondant ; `read` et `write` ne touchent
// qu'a des blocs verrouilles par ce backend.
//
// # GlobalUnlock
// GlobalUnlock retourne FALSE quand le compteur de verrous tombe a zero,
// ce qui n'est une erreur que si GetLastError est non nul.
//
// # Portabilite
// Ce module est specifique a Windows (Win32 API).

use std::collections::HashMap;
use std::ffi::c_void;

use crate::backend::{ClipboardBackend, MemoryBlock};
use crate::constants::{ERROR_INVALID_PARAMETER, FORMAT_NAME_CAPACITY};
use crate::error::{ClipError, ClipResult};
use crate::system::win32::*;

/// Acces au presse-papiers Windows du processus courant.
pub struct Win32Backend {
    owner: HWND,
    locked: HashMap<usize, *mut c_void>,
}

impl Default for Win32Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl Win32Backend {
    /// Backend sans fenetre proprietaire (tache courante).
    pub fn new() -> Self {
        Self::with_owner(NULL_HWND)
    }

    /// Backend associe a une fenetre proprietaire.
    pub fn with_owner(owner: HWND) -> Self {
        Self {
            owner,
            locked: HashMap::new(),
        }
    }

    fn raw(block: MemoryBlock) -> HGLOBAL {
        block.as_raw() as HGLOBAL
    }

    fn block(handle: HANDLE) -> Option<MemoryBlock> {
        if handle.is_null() {
            None
        } else {
            Some(MemoryBlock::from_raw(handle as usize))
        }
    }
}

impl ClipboardBackend for Win32Backend {
    fn open(&mut self) -> bool {
        // SAFETY: appel FFI Win32. owner est NULL ou une fenetre valide.
        unsafe { OpenClipboard(self.owner) != FALSE }
    }

    fn close(&mut self) -> bool {
        // SAFETY: appel FFI Win32 sans argument.
        unsafe { CloseClipboard() != FALSE }
    }

    fn empty(&mut self) -> bool {
        // SAFETY: appel FFI Win32 sans argument.
        unsafe { EmptyClipboard() != FALSE }
    }

    fn enum_formats(&mut self, previous: u32) -> u32 {
        // SAFETY: appel FFI Win32, entier par valeur.
        unsafe { EnumClipboardFormats(previous) }
    }

    fn get_data(&mut self, format: u32) -> Option<MemoryBlock> {
        // SAFETY: appel FFI Win32, le handle retourne appartient au systeme.
        Self::block(unsafe { GetClipboardData(format) })
    }

    fn set_data(&mut self, format: u32, block: MemoryBlock) -> Option<MemoryBlock> {
        // SAFETY: block provient de GlobalAlloc et n'est plus verrouille.
        Self::block(unsafe { SetClipboardData(format, Self::raw(block)) })
    }

    fn alloc(&mut self, flags: u32, size: usize) -> Option<MemoryBlock> {
        // SAFETY: appel FFI Win32, allocation par le systeme.
        Self::block(unsafe { GlobalAlloc(flags, size) })
    }

    fn free(&mut self, block: MemoryBlock) {
        self.locked.remove(&block.as_raw());
        // SAFETY: block provient de GlobalAlloc et n'a pas ete transmis au systeme.
        unsafe { GlobalFree(Self::raw(block)) };
    }

    fn lock(&mut self, block: MemoryBlock) -> bool {
        // SAFETY: block est un handle de memoire globale valide.
        let ptr = unsafe { GlobalLock(Self::raw(block)) };
        if ptr.is_null() {
            return false;
        }
        self.locked.insert(block.as_raw(), ptr);
        true
    }

    fn unlock(&mut self, block: MemoryBlock) -> bool {
        clear_last_error();
        // SAFETY: block est un handle de memoire globale valide.
        let still_locked = unsafe { GlobalUnlock(Self::raw(block)) } != FALSE;
        let ok = still_locked || last_error() == NO_ERROR;
        if ok {
            self.locked.remove(&block.as_raw());
        }
        ok
    }

    fn size(&self, block: MemoryBlock) -> usize {
        // SAFETY: block est un handle de memoire globale valide.
        unsafe { GlobalSize(Self::raw(block)) }
    }

    fn read(&self, block: MemoryBlock) -> Option<Vec<u8>> {
        let ptr = *self.locked.get(&block.as_raw())?;
        let size = self.size(block);
        // SAFETY: ptr provient de GlobalLock sur ce bloc, qui fait `size` octets.
        let slice = unsafe { std::slice::from_raw_parts(ptr as *const u8, size) };
        Some(slice.to_vec())
    }

    fn write(&mut self, block: MemoryBlock, bytes: &[u8]) -> bool {
        let ptr = match self.locked.get(&block.as_raw()) {
            Some(ptr) => *ptr,
            None => return false,
        };
        if bytes.len() > self.size(block) {
            return false;
        }
        // SAFETY: ptr provient de GlobalLock et le bloc contient au moins bytes.len() octets.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr as *mut u8, bytes.len());
        }
        true
    }

    fn register_format(&mut self, name: &str) -> ClipResult<u32> {
        let wname = to_wstring(name);
        // SAFETY: wname est null-termine et vit pendant l'appel.
        let code = unsafe { RegisterClipboardFormatW(wname.as_ptr()) };
        if code == 0 {
            return Err(ClipError::Os {
                op: "RegisterClipboardFormatW",
                code: last_error(),
            });
        }
        Ok(code)
    }

    fn format_name(&self, format: u32) -> ClipResult<Option<String>> {
        let mut buf = [0u16; FORMAT_NAME_CAPACITY];
        clear_last_error();
        // SAFETY: buf est un tampon local de FORMAT_NAME_CAPACITY caracteres.
        let len = unsafe {
            GetClipboardFormatNameW(format, buf.as_mut_ptr(), buf.len() as i32)
        };
        if len <= 0 {
            return match last_error() {
                NO_ERROR | ERROR_INVALID_PARAMETER => Ok(None),
                code => Err(ClipError::Os { op: "GetClipboardFormatNameW", code }),
            };
        }
        Ok(Some(from_wstring(&buf[..len as usize])))
    }
}
