use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error(transparent)]
    Gpu(#[from] aie_gpu::GpuError),

    #[error("Cannot allocate a {width}x{height} frame")]
    FrameAllocation { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, UiError>;
