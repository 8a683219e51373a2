use crate::geometry::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Barrier(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Windowed,
    Fullscreen,
}

impl Mode {
    pub fn from_fullscreen(fullscreen: bool) -> Self {
        if fullscreen {
            Mode::Fullscreen
        } else {
            Mode::Windowed
        }
    }
}

pub trait Shell {
    fn request_fullscreen(&mut self);

    fn request_windowed(&mut self);

    fn request_sync(&mut self, barrier: Barrier);

    fn request_frame(&mut self, token: FrameToken);
}

pub trait Canvas {
    fn resize(&mut self, size: Size);

    fn draw(&mut self, size: Size, time: u32);

    fn present(&mut self) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub struct RenderLoop {
    mode: Mode,
    configured: bool,
    size: Size,
    windowed_size: Size,
    pending_frame: Option<FrameToken>,
    barrier: Option<Barrier>,
    generation: u64,
    last_frame_time: u32,
}

impl RenderLoop {
    pub fn new(windowed_size: Size) -> Self {
        Self {
            mode: Mode::Windowed,
            configured: false,
            size: windowed_size,
            windowed_size,
            pending_frame: None,
            barrier: None,
            generation: 0,
            last_frame_time: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode == Mode::Fullscreen
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn windowed_size(&self) -> Size {
        self.windowed_size
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending_frame
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// A frame already scheduled is not cancelled, it is suppressed by the
    /// configured check once its callback fires.
    pub fn set_fullscreen(
        &mut self,
        fullscreen: bool,
        shell: &mut impl Shell,
        canvas: &mut impl Canvas,
    ) {
        self.mode = Mode::from_fullscreen(fullscreen);
        self.configured = false;
        log::debug!("requesting {:?} mode", self.mode);

        match self.mode {
            Mode::Fullscreen => shell.request_fullscreen(),
            Mode::Windowed => {
                shell.request_windowed();
                // Windowed mode gets no guaranteed configure from the compositor,
                // apply the remembered geometry right away.
                let size = self.windowed_size;
                self.configure(size, canvas);
            }
        }

        let barrier = Barrier(self.next_generation());
        self.barrier = Some(barrier);
        shell.request_sync(barrier);
    }

    pub fn toggle_fullscreen(&mut self, shell: &mut impl Shell, canvas: &mut impl Canvas) {
        self.set_fullscreen(!self.is_fullscreen(), shell, canvas);
    }

    pub fn configure(&mut self, size: Size, canvas: &mut impl Canvas) {
        if size != self.size {
            log::debug!("resize {} -> {}", self.size, size);
        }
        canvas.resize(size);
        self.size = size;

        if self.mode == Mode::Windowed {
            self.windowed_size = size;
        }
    }

    pub fn barrier_done(
        &mut self,
        barrier: Barrier,
        shell: &mut impl Shell,
        canvas: &mut impl Canvas,
    ) -> anyhow::Result<()> {
        if self.barrier != Some(barrier) {
            log::trace!("ignoring superseded barrier {:?}", barrier);
            return Ok(());
        }
        self.barrier = None;
        self.configured = true;
        log::debug!("{:?} mode configured at {}", self.mode, self.size);

        // sync callbacks carry a serial, keep the animation clock of the last frame
        if self.pending_frame.is_none() {
            self.draw_frame(self.last_frame_time, shell, canvas)?;
        }

        Ok(())
    }

    pub fn frame_done(
        &mut self,
        token: FrameToken,
        time: u32,
        shell: &mut impl Shell,
        canvas: &mut impl Canvas,
    ) -> anyhow::Result<()> {
        if self.pending_frame != Some(token) {
            log::debug!(
                "dropping stale frame callback {:?} (outstanding {:?})",
                token,
                self.pending_frame
            );
            return Ok(());
        }
        self.pending_frame = None;
        self.last_frame_time = time;

        if !self.configured {
            return Ok(());
        }

        self.draw_frame(time, shell, canvas)
    }

    fn draw_frame(
        &mut self,
        time: u32,
        shell: &mut impl Shell,
        canvas: &mut impl Canvas,
    ) -> anyhow::Result<()> {
        debug_assert!(self.pending_frame.is_none());

        canvas.draw(self.size, time);

        let token = FrameToken(self.next_generation());
        self.pending_frame = Some(token);
        shell.request_frame(token);

        canvas.present()
    }
}
