pub mod disease;
