/// Time-to-scale zoom curve and the pre-scaled foreground animation unit.
pub mod zoom;
