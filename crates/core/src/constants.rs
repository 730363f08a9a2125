/// Decimal precision for stored report totals (hours, earnings, revenue)
pub const DECIMAL_PRECISION: u32 = 6;
