use spinny::geometry::Size;
use spinny::render_loop::{Barrier, Canvas, FrameToken, RenderLoop, Shell};

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Fullscreen,
    Windowed,
    Sync(Barrier),
    Frame(FrameToken),
}

#[derive(Default)]
pub struct FakeCompositor {
    pub requests: Vec<Request>,
    pub output: Option<Size>,
    pub target_size: Option<Size>,
    pub draws: Vec<u32>,
    pub presents: usize,
}

struct Shelf<'a>(&'a mut Vec<Request>);

impl Shell for Shelf<'_> {
    fn request_fullscreen(&mut self) {
        self.0.push(Request::Fullscreen);
    }

    fn request_windowed(&mut self) {
        self.0.push(Request::Windowed);
    }

    fn request_sync(&mut self, barrier: Barrier) {
        self.0.push(Request::Sync(barrier));
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.0.push(Request::Frame(token));
    }
}

struct Target<'a> {
    size: &'a mut Option<Size>,
    draws: &'a mut Vec<u32>,
    presents: &'a mut usize,
}

impl Canvas for Target<'_> {
    fn resize(&mut self, size: Size) {
        *self.size = Some(size);
    }

    fn draw(&mut self, size: Size, time: u32) {
        assert_eq!(Some(size), *self.size, "drawing at a size the target was not resized to");
        self.draws.push(time);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        *self.presents += 1;
        Ok(())
    }
}

impl FakeCompositor {
    pub fn with_output(output: Size) -> Self {
        Self {
            output: Some(output),
            ..Default::default()
        }
    }

    fn split(&mut self) -> (Shelf<'_>, Target<'_>) {
        (
            Shelf(&mut self.requests),
            Target {
                size: &mut self.target_size,
                draws: &mut self.draws,
                presents: &mut self.presents,
            },
        )
    }

    pub fn set_fullscreen(&mut self, rl: &mut RenderLoop, fullscreen: bool) {
        let (mut shell, mut canvas) = self.split();
        rl.set_fullscreen(fullscreen, &mut shell, &mut canvas);
    }

    pub fn roundtrip(&mut self, rl: &mut RenderLoop, time: u32) {
        let requests = std::mem::take(&mut self.requests);

        if requests.contains(&Request::Fullscreen) && rl.is_fullscreen() {
            if let Some(output) = self.output {
                let (_, mut canvas) = self.split();
                rl.configure(output, &mut canvas);
            }
        }

        for request in requests {
            let (mut shell, mut canvas) = self.split();
            match request {
                Request::Sync(barrier) => {
                    rl.barrier_done(barrier, &mut shell, &mut canvas).unwrap()
                }
                Request::Frame(token) => rl
                    .frame_done(token, time, &mut shell, &mut canvas)
                    .unwrap(),
                Request::Fullscreen | Request::Windowed => {}
            }
        }
    }

    pub fn frames_requested(&self) -> usize {
        self.requests
            .iter()
            .filter(|r| matches!(r, Request::Frame(_)))
            .count()
    }
}
