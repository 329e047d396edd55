//! Persistence boundary: structured records to the wide flat `.tab` layout.

pub mod tables;

pub use tables::{
    cycle_to_row, executed_rows, rejected_rows, user_trade_log_rows, write_rows,
    AggregateSummaryRow, CycleRow, ParticipantRow, PeriodSummaryRow, UserTradeLogRow,
};
