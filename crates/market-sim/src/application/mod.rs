mod simulator;

pub use simulator::MarketSimulator;
