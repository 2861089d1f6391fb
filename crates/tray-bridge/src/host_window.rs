//! The native host window: class registration, the message pump, and
//! the window procedure that feeds the message router.

use crate::{AppError, AppResult, config::HostConfig, shell_win32::Win32Shell};
use tray_bridge_core::{BridgeHost, Routed, TrayHost, UiRuntime, WindowMessage, route_message};

use std::{ffi::c_void, iter, panic::Location, sync::Once};

use error_location::ErrorLocation;
use tracing::{debug, error, warn};
use windows::{
    Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    Win32::System::LibraryLoader::GetModuleHandleW,
    Win32::UI::WindowsAndMessaging::{
        CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DispatchMessageW, GWLP_USERDATA,
        GetMessageW, GetWindowLongPtrW, IDC_ARROW, LoadCursorW, MSG, PostMessageW,
        PostQuitMessage, RegisterClassW, SW_SHOW, SetWindowLongPtrW, ShowWindow,
        TranslateMessage, WINDOW_EX_STYLE, WM_APP, WM_DESTROY, WNDCLASSW, WS_OVERLAPPEDWINDOW,
    },
    core::{PCWSTR, w},
};

/// Posted by the embedder after queueing calls on the messenger; wakes
/// the pump so pending calls drain on the window thread.
pub const BRIDGE_WAKE_MESSAGE: u32 = WM_APP;

/// Posted by the embedder once the UI runtime has produced its first
/// frame; reveals the window.
pub const FIRST_FRAME_MESSAGE: u32 = WM_APP + 1;

static REGISTER_HOST_CLASS: Once = Once::new();

/// The top-level window hosting the UI runtime and the tray icon.
///
/// Owns the tray host, the bridge's host half, and the runtime; the
/// window procedure dispatches into all three through the pointer
/// stashed in `GWLP_USERDATA`. Everything runs on the thread that
/// called [`HostWindow::create`].
pub struct HostWindow {
    hwnd: HWND,
    host: TrayHost<Win32Shell>,
    bridge: BridgeHost,
    runtime: Box<dyn UiRuntime>,
    revealed: bool,
}

impl HostWindow {
    /// Creates the window hidden and wires the tray host to it.
    ///
    /// The returned box must stay put for the life of the window; the
    /// window procedure dereferences a raw pointer to it.
    #[track_caller]
    pub fn create(
        config: &HostConfig,
        runtime: Box<dyn UiRuntime>,
        bridge: BridgeHost,
    ) -> AppResult<Box<Self>> {
        let instance = unsafe { GetModuleHandleW(None) }.map_err(|e| AppError::WindowError {
            reason: format!("Failed to get module handle: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let class_name = w!("TrayBridgeHostWindow");

        REGISTER_HOST_CLASS.call_once(|| {
            let class = WNDCLASSW {
                lpfnWndProc: Some(host_wnd_proc),
                hInstance: instance.into(),
                lpszClassName: class_name,
                hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
                ..Default::default()
            };
            unsafe { RegisterClassW(&class) };
        });

        let title: Vec<u16> = config
            .window
            .title
            .encode_utf16()
            .chain(iter::once(0))
            .collect();

        // Created hidden; FIRST_FRAME_MESSAGE reveals it once the
        // runtime has content, so users never see an unpainted frame.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE::default(),
                class_name,
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                config.window.width as i32,
                config.window.height as i32,
                None,
                None,
                instance,
                None,
            )
        }
        .map_err(|e| AppError::WindowError {
            reason: format!("Failed to create host window: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let event_tx = bridge.event_sender();
        let mut window = Box::new(Self {
            hwnd,
            host: TrayHost::new(Win32Shell::new(hwnd), event_tx),
            bridge,
            runtime,
            revealed: false,
        });

        unsafe {
            SetWindowLongPtrW(hwnd, GWLP_USERDATA, window.as_mut() as *mut Self as isize);
        }

        debug!("Host window created");
        Ok(window)
    }

    /// The underlying window handle.
    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// A cloneable handle that wakes the pump from other threads.
    pub fn waker(&self) -> BridgeWaker {
        BridgeWaker {
            hwnd: self.hwnd.0 as isize,
        }
    }

    /// Runs the message pump until `WM_DESTROY` posts the quit
    /// message.
    pub fn run(&mut self) -> AppResult<()> {
        let mut message = MSG::default();
        while unsafe { GetMessageW(&mut message, None, 0, 0) }.as_bool() {
            unsafe {
                let _ = TranslateMessage(&message);
                let _ = DispatchMessageW(&message);
            }
        }
        debug!("Message pump exited");
        Ok(())
    }

    /// `Some` claims the message; `None` falls through to
    /// `DefWindowProcW`.
    fn handle_message(&mut self, message: WindowMessage) -> Option<LRESULT> {
        match route_message(self.runtime.as_mut(), &message) {
            Routed::Claimed(value) => Some(LRESULT(value)),
            Routed::FontsReloaded => None,
            Routed::TrayInteraction => {
                if let Err(error) = self.host.open_menu() {
                    warn!(error = %error, "Popup menu failed");
                }
                Some(LRESULT(0))
            }
            Routed::Unhandled => match message.message {
                BRIDGE_WAKE_MESSAGE => {
                    self.pump_bridge();
                    Some(LRESULT(0))
                }
                FIRST_FRAME_MESSAGE => {
                    self.reveal();
                    Some(LRESULT(0))
                }
                WM_DESTROY => {
                    self.host.shutdown();
                    unsafe { PostQuitMessage(0) };
                    Some(LRESULT(0))
                }
                _ => None,
            },
        }
    }

    fn pump_bridge(&mut self) {
        while let Some(call) = self.bridge.try_next_call() {
            let result = self.host.handle_call(call.envelope());
            call.respond(result);
        }
    }

    fn reveal(&mut self) {
        if self.revealed {
            return;
        }
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_SHOW);
        }
        self.revealed = true;
        debug!("Host window revealed on first frame");
    }
}

impl Drop for HostWindow {
    fn drop(&mut self) {
        // The window procedure must not dereference a dead pointer.
        unsafe {
            SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
        }
    }
}

/// Wakes the host window's message pump from any thread.
///
/// `PostMessageW` is documented as safe to call cross-thread, which is
/// what lets the async bridge half live on a runtime thread while the
/// pump stays on the window thread.
#[derive(Clone, Copy, Debug)]
pub struct BridgeWaker {
    hwnd: isize,
}

impl BridgeWaker {
    /// Asks the pump to drain pending bridge calls.
    pub fn wake(&self) {
        self.post(BRIDGE_WAKE_MESSAGE);
    }

    /// Tells the window the runtime painted its first frame.
    pub fn notify_first_frame(&self) {
        self.post(FIRST_FRAME_MESSAGE);
    }

    fn post(&self, message: u32) {
        let hwnd = HWND(self.hwnd as *mut c_void);
        if let Err(error) = unsafe { PostMessageW(hwnd, message, WPARAM(0), LPARAM(0)) } {
            error!(error = %error, message, "Failed to post to the host window");
        }
    }
}

unsafe extern "system" fn host_wnd_proc(
    hwnd: HWND,
    message: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let window = unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut HostWindow;

    if !window.is_null() {
        let claimed = unsafe { &mut *window }.handle_message(WindowMessage {
            message,
            wparam: wparam.0,
            lparam: lparam.0,
        });
        if let Some(result) = claimed {
            return result;
        }
    }

    unsafe { DefWindowProcW(hwnd, message, wparam, lparam) }
}
