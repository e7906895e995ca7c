pub mod design;
pub mod icon_gen;
pub mod inspect;
pub mod raster;
