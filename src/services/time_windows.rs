//! Limites de tempo do relatório
//!
//! Todos os limites saem do mesmo instante `now`, no mesmo fuso, e são
//! expressos em epoch milissegundos (truncado, nunca arredondado).

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;

/// Conjunto fixo de limites calculado uma vez por execução
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindows {
    pub now: i64,
    pub hour_ago: i64,
    pub today_start: i64,
    pub yesterday_start: i64,
    /// `today_start - 1`: o milissegundo imediatamente anterior a hoje
    pub yesterday_end: i64,
    pub month_start: i64,
}

impl TimeWindows {
    pub fn compute(now: DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let yesterday = today.pred_opt().unwrap_or(today);
        let first_of_month = today.with_day(1).unwrap_or(today);

        let today_start = local_midnight(&tz, today).timestamp_millis();

        Self {
            now: now.timestamp_millis(),
            hour_ago: (now - Duration::hours(1)).timestamp_millis(),
            today_start,
            yesterday_start: local_midnight(&tz, yesterday).timestamp_millis(),
            yesterday_end: today_start - 1,
            month_start: local_midnight(&tz, first_of_month).timestamp_millis(),
        }
    }
}

/// Meia-noite local de `date`. Se o fuso pular a meia-noite (horário de
/// verão), usa o primeiro instante válido do dia.
fn local_midnight(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    (0..24)
        .filter_map(|hour| date.and_hms_opt(hour, 0, 0))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
}
