mod mock;

pub use mock::MockQueryExecutor;
