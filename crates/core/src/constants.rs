use rust_decimal::Decimal;
use std::time::Duration;

/// Key of the key-value slot holding the local coin collection
pub const DEFAULT_STORAGE_KEY: &str = "coins";

/// Name of the remote document collection holding one document per coin
pub const DEFAULT_COLLECTION: &str = "coins";

/// Interval at which the local backend re-reads its slot for external changes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Decimal places kept when deriving a coin's ROI percentage
pub const ROI_DECIMAL_PRECISION: u32 = 2;

/// Largest amount accepted for prices, values and the cash reserve (10^15)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);
