// ClipUtil - Bindings et constantes Win32
// Declarations FFI pour les APIs Windows utilisees
//
// Ce fichier contient les declarations FFI necessaires pour acceder au
// presse-papiers et a la memoire globale depuis Rust, sans crate
// windows ou winapi.
//
// # Organisation
// 1. Types de base Win32 (HWND, HANDLE, BOOL, etc.)
// 2. Declarations FFI extern "system" par DLL (user32, kernel32)
// 3. Fonctions helpers Rust (to_wstring, from_wstring, last_error)
//
// # Safety
// Toutes les fonctions FFI sont marquees unsafe. Le wrapper safe est
// `backend::win32::Win32Backend`.

#![allow(non_snake_case, non_camel_case_types, dead_code)]

use std::ffi::c_void;

// --- Types de base Win32 ---
pub type HANDLE = *mut c_void;
pub type HWND = *mut c_void;
pub type HGLOBAL = *mut c_void;
pub type BOOL = i32;
pub type UINT = u32;
pub type LPCWSTR = *const u16;
pub type LPWSTR = *mut u16;

pub const FALSE: BOOL = 0;
pub const NULL_HWND: HWND = std::ptr::null_mut();
pub const NO_ERROR: u32 = 0;

// --- FFI user32 ---
#[link(name = "user32")]
extern "system" {
    pub fn OpenClipboard(hWnd: HWND) -> BOOL;
    pub fn CloseClipboard() -> BOOL;
    pub fn EmptyClipboard() -> BOOL;
    pub fn GetClipboardData(fmt: UINT) -> HANDLE;
    pub fn SetClipboardData(fmt: UINT, hMem: HANDLE) -> HANDLE;
    pub fn EnumClipboardFormats(fmt: UINT) -> UINT;
    pub fn RegisterClipboardFormatW(name: LPCWSTR) -> UINT;
    pub fn GetClipboardFormatNameW(fmt: UINT, buf: LPWSTR, cch: i32) -> i32;
}

// --- FFI kernel32 ---
#[link(name = "kernel32")]
extern "system" {
    pub fn GetLastError() -> u32;
    pub fn SetLastError(code: u32);
    pub fn GlobalAlloc(flags: UINT, bytes: usize) -> HGLOBAL;
    pub fn GlobalLock(hMem: HGLOBAL) -> *mut c_void;
    pub fn GlobalUnlock(hMem: HGLOBAL) -> BOOL;
    pub fn GlobalSize(hMem: HGLOBAL) -> usize;
    pub fn GlobalFree(hMem: HGLOBAL) -> HGLOBAL;
}

// --- Helpers ---

/// Convertit un &str en Vec<u16> UTF-16 null-termine.
pub fn to_wstring(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convertit un slice UTF-16 (possiblement null-termine) en String.
pub fn from_wstring(s: &[u16]) -> String {
    let len = s.iter().position(|&c| c == 0).unwrap_or(s.len());
    String::from_utf16_lossy(&s[..len])
}

/// Recupere le dernier code d'erreur Win32.
pub fn last_error() -> u32 {
    // SAFETY: Fonction Win32 sans effet de bord dangereux.
    unsafe { GetLastError() }
}

/// Remet a zero le dernier code d'erreur Win32.
pub fn clear_last_error() {
    // SAFETY: Fonction Win32 sans effet de bord dangereux.
    unsafe { SetLastError(NO_ERROR) }
}
