pub mod matrix_display;
pub mod scaled_matrix;
pub mod traits;
