mod fixtures;
mod test_load_average;
mod test_utilization_filter;
mod test_windowed_statistics;
