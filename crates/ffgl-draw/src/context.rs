//! Host GL context bookkeeping.

use std::sync::Once;

static GL_INIT_ONCE: Once = Once::new();

/// Load GL function pointers from the host process, exactly once.
pub fn load_gl_once() {
    GL_INIT_ONCE.call_once(|| {
        gl_loader::init_gl();
        gl::load_with(|s| gl_loader::get_proc_address(s).cast());
    });
}

/// Whether an OpenGL context is current on this thread.
///
/// Teardown paths use this to decide if GL handles can still be deleted;
/// hosts sometimes destroy the context before deinstantiating plugins.
pub fn is_context_current() -> bool {
    unsafe { !gl::GetString(gl::VERSION).is_null() }
}

/// Drain the GL error queue so later checks see only our own errors.
pub fn clear_gl_errors() {
    unsafe { while gl::GetError() != gl::NO_ERROR {} }
}
