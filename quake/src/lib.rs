pub mod binaries;
pub mod bsp;
pub mod error;
pub mod pak;
pub mod palette;
pub mod prelude;

#[cfg(test)]
mod test_data;
