pub mod context;
pub mod dispatch;
pub mod executor;
pub mod pager;
pub mod rules;

#[cfg(test)]
pub mod testing;
