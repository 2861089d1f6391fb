//! Win32 shell integration: the notification-area icon, the native
//! popup menu, and the user notification state query.

use tray_bridge_core::{BridgeError, PopupEntry, Result, ShellBackend, TRAY_CALLBACK_MESSAGE};

use std::{iter, mem, panic::Location};

use error_location::ErrorLocation;
use tracing::debug;
use windows::{
    Win32::Foundation::{HWND, POINT},
    Win32::UI::Shell::{
        NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NIM_MODIFY, NOTIFY_ICON_MESSAGE,
        NOTIFYICONDATAW, QUNS_BUSY, QUNS_PRESENTATION_MODE, QUNS_RUNNING_D3D_FULL_SCREEN,
        SHQueryUserNotificationState, Shell_NotifyIconW,
    },
    Win32::UI::WindowsAndMessaging::{
        AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, HMENU, IDI_APPLICATION,
        LoadIconW, MF_GRAYED, MF_SEPARATOR, MF_STRING, SetForegroundWindow, TPM_NONOTIFY,
        TPM_RETURNCMD, TrackPopupMenu,
    },
    core::PCWSTR,
};

const ICON_ID: u32 = 1;

/// Notification-area backend over `Shell_NotifyIconW` and
/// `TrackPopupMenu`, bound to the host window that receives the tray
/// callback message.
pub struct Win32Shell {
    hwnd: HWND,
}

impl Win32Shell {
    /// Binds the backend to the window whose procedure handles the
    /// tray callback.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    fn icon_data(&self, tooltip: &str) -> Result<NOTIFYICONDATAW> {
        let icon =
            unsafe { LoadIconW(None, IDI_APPLICATION) }.map_err(|e| BridgeError::ShellSyncFailed {
                reason: format!("Failed to load icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut data = NOTIFYICONDATAW {
            cbSize: mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: ICON_ID,
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: TRAY_CALLBACK_MESSAGE,
            hIcon: icon,
            ..Default::default()
        };

        // szTip is fixed-width and NUL-terminated. The state layer
        // clamps characters, not UTF-16 units, so clamp again here.
        let limit = data.szTip.len() - 1;
        for (slot, unit) in data.szTip.iter_mut().zip(tooltip.encode_utf16().take(limit)) {
            *slot = unit;
        }

        Ok(data)
    }

    fn notify(&self, message: NOTIFY_ICON_MESSAGE, data: &NOTIFYICONDATAW) -> Result<()> {
        if unsafe { Shell_NotifyIconW(message, data) }.as_bool() {
            Ok(())
        } else {
            Err(BridgeError::ShellSyncFailed {
                reason: format!("Shell_NotifyIconW rejected message {}", message.0),
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}

impl ShellBackend for Win32Shell {
    fn add_icon(&mut self, tooltip: &str) -> Result<()> {
        let data = self.icon_data(tooltip)?;
        self.notify(NIM_ADD, &data)?;
        debug!("Tray icon registered");
        Ok(())
    }

    fn modify_icon(&mut self, tooltip: &str) -> Result<()> {
        let data = self.icon_data(tooltip)?;
        self.notify(NIM_MODIFY, &data)
    }

    fn remove_icon(&mut self) -> Result<()> {
        // Removal only needs the identifying fields.
        let data = NOTIFYICONDATAW {
            cbSize: mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: self.hwnd,
            uID: ICON_ID,
            ..Default::default()
        };
        self.notify(NIM_DELETE, &data)?;
        debug!("Tray icon removed");
        Ok(())
    }

    fn show_popup_menu(&mut self, entries: &[PopupEntry]) -> Result<Option<u32>> {
        let menu = PopupMenu::create()?;

        for entry in entries {
            match entry {
                PopupEntry::Separator => {
                    unsafe { AppendMenuW(menu.handle(), MF_SEPARATOR, 0, PCWSTR::null()) }
                        .map_err(|e| BridgeError::PopupFailed {
                            reason: format!("Failed to append separator: {}", e),
                            location: ErrorLocation::from(Location::caller()),
                        })?;
                }
                PopupEntry::Item {
                    command,
                    label,
                    enabled,
                } => {
                    let mut flags = MF_STRING;
                    if !enabled {
                        flags |= MF_GRAYED;
                    }
                    let label: Vec<u16> = label.encode_utf16().chain(iter::once(0)).collect();
                    unsafe {
                        AppendMenuW(menu.handle(), flags, *command as usize, PCWSTR(label.as_ptr()))
                    }
                    .map_err(|e| BridgeError::PopupFailed {
                        reason: format!("Failed to append item: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                }
            }
        }

        let mut cursor = POINT::default();
        unsafe { GetCursorPos(&mut cursor) }.map_err(|e| BridgeError::PopupFailed {
            reason: format!("Failed to read cursor position: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Without foreground status the popup will not dismiss when
        // the user clicks elsewhere.
        unsafe {
            let _ = SetForegroundWindow(self.hwnd);
        }

        let chosen = unsafe {
            TrackPopupMenu(
                menu.handle(),
                TPM_RETURNCMD | TPM_NONOTIFY,
                cursor.x,
                cursor.y,
                0,
                self.hwnd,
                None,
            )
        };

        // With TPM_RETURNCMD the BOOL carries the chosen command id;
        // zero means the menu was dismissed.
        let command = chosen.0 as u32;
        Ok((command != 0).then_some(command))
    }

    fn do_not_disturb_active(&mut self) -> Result<bool> {
        let state = unsafe { SHQueryUserNotificationState() }.map_err(|e| {
            BridgeError::ShellSyncFailed {
                reason: format!("Notification state query failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        Ok(state == QUNS_BUSY
            || state == QUNS_PRESENTATION_MODE
            || state == QUNS_RUNNING_D3D_FULL_SCREEN)
    }
}

/// Owns the `HMENU` for one popup session; destroyed on drop so every
/// exit path releases it.
struct PopupMenu(HMENU);

impl PopupMenu {
    fn create() -> Result<Self> {
        let handle = unsafe { CreatePopupMenu() }.map_err(|e| BridgeError::PopupFailed {
            reason: format!("Failed to create popup menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(Self(handle))
    }

    fn handle(&self) -> HMENU {
        self.0
    }
}

impl Drop for PopupMenu {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyMenu(self.0);
        }
    }
}
