//! Save/load of noise configurations and sample grids (RON), plus PNG
//! previews of a composed grid.

pub mod field_io;

pub use field_io::{
    config_filename, list_configs, load_config, load_grid, save_config, save_grid,
    save_named_config, save_preview_png, FieldIoError, CONFIGS_DIR,
};
