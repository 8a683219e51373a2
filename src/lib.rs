pub mod config;
pub mod geometry;
pub mod graphics;
pub mod render_loop;
pub mod scene;
pub mod window;

#[macro_export]
macro_rules! prog_name {
    () => {
        "spinny"
    };
}
