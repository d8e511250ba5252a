use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

/// Calendar-month bucket (year, month) used as the grouping key for all
/// monthly indicators. Ordered chronologically; displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MesAno {
    pub ano: i32,
    pub mes: u32,
}

impl MesAno {
    pub fn new(ano: i32, mes: u32) -> Self {
        debug_assert!((1..=12).contains(&mes));
        MesAno { ano, mes }
    }

    /// Month bucket of a given date.
    pub fn from_date(d: NaiveDate) -> Self {
        MesAno {
            ano: d.year(),
            mes: d.month(),
        }
    }

    /// First day of this month.
    pub fn primeiro_dia(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.ano, self.mes, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.ano, 1, 1).unwrap())
    }

    /// First day of the following month (year rollover handled).
    pub fn proximo(&self) -> MesAno {
        if self.mes == 12 {
            MesAno::new(self.ano + 1, 1)
        } else {
            MesAno::new(self.ano, self.mes + 1)
        }
    }
}

impl fmt::Display for MesAno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.ano, self.mes)
    }
}

impl Serialize for MesAno {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Number of business days (Mon–Fri, no holiday calendar) from the first
/// day of the month to the first day of the next month, end exclusive.
pub fn dias_uteis(mes: MesAno) -> i64 {
    let start = mes.primeiro_dia();
    let end = mes.proximo().primeiro_dia();
    let mut count = 0i64;
    let mut current = start;
    while current < end {
        match current.weekday() {
            Weekday::Sat | Weekday::Sun => {}
            _ => count += 1,
        }
        current += Duration::days(1);
    }
    count
}
