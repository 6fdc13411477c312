pub(crate) mod brand;
