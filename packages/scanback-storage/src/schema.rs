/// Statements creating the tag table, in execution order.
pub fn statements() -> impl Iterator<Item = &'static str> {
	include_str!("../../../sql/init.sql").split(';').map(str::trim).filter(|sql| !sql.is_empty())
}
