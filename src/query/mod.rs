//! Query engine
//!
//! A fixed set of query shapes over an immutable [`TransactionTable`].
//! Every operation is a pure function of its inputs: nothing here mutates a
//! table, holds state between calls, or performs I/O.
//!
//! Aggregates accept any [`RowSource`], so the same call works over a whole
//! table, a filtered subset or a masked view.
//!
//! [`TransactionTable`]: crate::table::TransactionTable
//! [`RowSource`]: crate::table::RowSource

mod errors;
mod filters;
mod grouping;
mod pricing;
mod range;
mod ranking;
mod revenue;

pub use errors::{QueryError, QueryErrorCode, QueryResult, Severity};
pub use filters::{
    filter, filter_by_date_range, filter_by_quantity_greater_than, filter_by_user,
    mask_zero_quantity, RowPredicate,
};
pub use grouping::{
    most_purchased_product, product_counts, product_revenue, top_products_by_revenue,
    transaction_counts_per_user, unique_user_count, UserTransactionCount,
};
pub use pricing::{increase_prices, PRICE_SCALE};
pub use range::DateRange;
pub use ranking::{ProductCount, ProductRevenue, RankDirection, Ranked, Ranker};
pub use revenue::{compare_revenue, revenue_in_range, revenue_within, row_revenue, total_revenue};
