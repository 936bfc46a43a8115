use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// Document metadata written to the PDF's information dictionary
#[derive(Default, Debug, Clone)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// The application that produced the original content, if any
    pub creator: Option<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Info {
        self.title = Some(title.into());
        self
    }

    pub fn with_author<S: Into<String>>(mut self, author: S) -> Info {
        self.author = Some(author.into());
        self
    }

    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Info {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_creator<S: Into<String>>(mut self, creator: S) -> Info {
        self.creator = Some(creator.into());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        if let Some(creator) = &self.creator {
            info.creator(TextStr(creator));
        }
        info.producer(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(Local::now()));
    }
}

fn pdf_date(now: DateTime<Local>) -> Date {
    let offset = now.offset().fix().local_minus_utc();
    let offset_hours = offset / 3600;
    let offset_minutes = ((offset % 3600) / 60).abs();
    Date::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}
