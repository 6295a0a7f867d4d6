use crate::types::daily_record::DailyRecord;
use crate::types::date_map::DateMap;

/// Combines the daily records of several stations, averaging dates reported by more
/// than one station with equal weight.
///
/// Every overlapping date is summed over all stations and divided by its count, so the
/// resulting values do not depend on the order the stations are given in. Output dates
/// are ordered by first appearance across the inputs.
pub fn merge_daily_records<'a>(
    stations: impl IntoIterator<Item = &'a DateMap<DailyRecord>>,
) -> DateMap<DailyRecord> {
    let mut sums: DateMap<(DailyRecord, u32)> = DateMap::new();

    for station in stations {
        for (date, record) in station.iter() {
            match sums.get_mut(date) {
                Some((sum, count)) => {
                    *sum += *record;
                    *count += 1;
                }
                None => {
                    sums.insert(date, (*record, 1));
                }
            }
        }
    }

    sums.map_values(|&(sum, count)| sum / f64::from(count))
}
