/// Sum of every element.
pub fn calculate_sum(values: &[i64]) -> i64 {
    values.iter().sum()
}
