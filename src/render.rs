pub(crate) mod blend;
pub(crate) mod context;
pub(crate) mod draw;
pub(crate) mod markup;
pub(crate) mod raster;
pub(crate) mod text_layer;
