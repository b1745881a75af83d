pub mod panels;

pub use panels::{render_bottom_panel, render_central_panel, render_top_panel};
