pub mod errors;
pub mod db;
pub mod survey;

#[cfg(test)]
mod tests;
