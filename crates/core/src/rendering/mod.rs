pub mod markdown_renderer;
pub mod render_options;
