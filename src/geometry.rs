use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub(crate) fn as_i32(&self) -> (i32, i32) {
        (
            self.width.try_into().unwrap_or(i32::MAX),
            self.height.try_into().unwrap_or(i32::MAX),
        )
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(250, 250)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once('x')
            .filter(|(_, h)| !h.contains('x'))
            .ok_or_else(|| format!("bad geometry specification \"{}\"", s))?;

        let parse = |v: &str| {
            v.trim()
                .parse::<u32>()
                .ok()
                .filter(|&v| v > 0)
                .ok_or_else(|| format!("bad geometry specification \"{}\"", s))
        };

        Ok(Self::new(parse(width)?, parse(height)?))
    }
}
