mod expiring;

pub use expiring::ExpiringCache;
