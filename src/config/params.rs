use super::Config;
use crate::geometry::Size;
use crate::scene::SceneKind;
use crate::window::Params as WindowParams;

impl<'a> From<&'a Config> for WindowParams {
    fn from(config: &'a Config) -> WindowParams {
        let default = Size::default();
        WindowParams {
            size: Size::new(
                config.width.filter(|&w| w > 0).unwrap_or(default.width),
                config.height.filter(|&h| h > 0).unwrap_or(default.height),
            ),
            fullscreen: config.fullscreen.unwrap_or(false),
            title: config
                .title
                .clone()
                .unwrap_or_else(|| crate::prog_name!().to_owned()),
        }
    }
}

impl<'a> From<&'a Config> for SceneKind {
    fn from(config: &'a Config) -> SceneKind {
        config.scene.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn defaults() {
        let params: WindowParams = Config::default().param();

        assert_eq!(params.size, Size::new(250, 250));
        assert!(!params.fullscreen);
        assert_eq!(params.title, crate::prog_name!());
        assert_eq!(Config::default().param::<SceneKind>(), SceneKind::Triangle);
    }

    #[test_case("width = 0\nheight = 0", Size::new(250, 250) ; "zero falls back")]
    #[test_case("width = 800", Size::new(800, 250) ; "partial")]
    #[test_case("width = 800\nheight = 600", Size::new(800, 600) ; "both")]
    fn size_from_config(toml: &str, expected: Size) {
        let params: WindowParams = Config::from_toml(toml).unwrap().param();
        assert_eq!(params.size, expected);
    }

    #[test]
    fn overrides_win() {
        let mut config = Config::from_toml("fullscreen = false\nwidth = 10").unwrap();
        config.override_fullscreen(true);
        config.override_size(Size::new(320, 200));
        config.override_scene(SceneKind::Cube);

        let params: WindowParams = config.param();
        assert!(params.fullscreen);
        assert_eq!(params.size, Size::new(320, 200));
        assert_eq!(config.param::<SceneKind>(), SceneKind::Cube);
    }
}
