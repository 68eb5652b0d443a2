use bitfield::bitfield;
#[cfg(feature = "chrono")]
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use derive_more::Into;

bitfield! {
    #[derive(Copy, Clone, Debug, Default, Into, PartialEq, Eq)]
    pub struct Date(u16);
    year_offset, set_year_offset: 15, 9;
    pub month, set_month: 8, 5;
    pub day, set_day: 4, 0;
}

impl Date {
    pub fn year(&self) -> u16 {
        self.year_offset() + 1980
    }
}

impl From<u16> for Date {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

bitfield! {
    #[derive(Copy, Clone, Debug, Default, Into, PartialEq, Eq)]
    pub struct Time(u16);
    pub hour, set_hour: 15, 11;
    pub minute, set_minute: 10, 5;
    pub double_second, set_double_second: 4, 0;
}

impl Time {
    pub fn second(&self) -> u16 {
        self.double_second() * 2
    }
}

impl From<u16> for Time {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
    /// 10ms units, 0 ~ 199
    pub centisecond: u8,
}

impl DateTime {
    pub fn millisecond(&self) -> u32 {
        self.centisecond as u32 * 10
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<DateTime> for NaiveDateTime {
    type Error = ();
    fn try_from(datetime: DateTime) -> Result<Self, ()> {
        let (date, time) = (datetime.date, datetime.time);
        let naive_date = NaiveDate::from_ymd_opt(date.year() as i32, date.month() as u32, date.day() as u32);
        let (hour, minute) = (time.hour() as u32, time.minute() as u32);
        // 100 ~ 199 centiseconds encode the odd second
        let second = time.second() as u32 + datetime.centisecond as u32 / 100;
        let millisecond = (datetime.centisecond as u32 % 100) * 10;
        let naive_time = NaiveTime::from_hms_milli_opt(hour, minute, second, millisecond);
        Ok(NaiveDateTime::new(naive_date.ok_or(())?, naive_time.ok_or(())?))
    }
}
