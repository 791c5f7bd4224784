//! CSV bulk transfer: a pure codec for the registry's wire format plus the
//! structured reports the store builds on top of it. The format is the
//! original one the desktop tool has always exchanged: `phone,name,address,
//! email` split on literal commas, no header row, no quoting or escaping. A
//! comma inside an address therefore misparses on re-import; that is a
//! documented limitation of the format, and upgrading to quoted CSV would
//! silently break compatibility with existing files, so the codec below
//! disables the quoting machinery in both directions on purpose.

use std::fmt;
use std::io::{Read, Write};

use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::error::{CsvContext, IoContext, Result};
use crate::models::Customer;
use crate::validate::{email_error, is_valid_phone, normalize_phone};

/// Why a CSV line was not accepted. Carried next to the line number so the
/// caller (or a test) can see exactly which rows failed and why, instead of
/// only a count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Normalized phone was not 7 to 11 digits. Header rows land here too,
    /// since "phone" normalizes to the empty string.
    InvalidPhone,
    MissingName,
    MissingAddress,
    /// The email shape check failed; carries its message.
    InvalidEmail(String),
    /// The phone key already existed in the store at insert time.
    DuplicatePhone,
    /// The line could not be decoded as UTF-8.
    Unreadable,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InvalidPhone => write!(f, "phone must be 7-11 digits"),
            RejectReason::MissingName => write!(f, "name is required"),
            RejectReason::MissingAddress => write!(f, "address is required"),
            RejectReason::InvalidEmail(msg) => write!(f, "{msg}"),
            RejectReason::DuplicatePhone => write!(f, "phone already exists"),
            RejectReason::Unreadable => write!(f, "line is not valid UTF-8"),
        }
    }
}

/// A rejected line: 1-based line number plus the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub line: usize,
    pub reason: RejectReason,
}

/// Outcome of parsing a whole CSV stream. Accepted rows keep their line
/// numbers so the import step can attribute later duplicate-key skips to the
/// right line.
#[derive(Debug, Default)]
pub struct ParsedCsv {
    pub accepted: Vec<(usize, Customer)>,
    pub rejections: Vec<Rejection>,
    pub lines_read: usize,
}

/// Final report of a bulk import: rows actually inserted, every rejection
/// with its line and reason, and how many lines were read overall.
#[derive(Debug)]
pub struct ImportReport {
    pub inserted: usize,
    pub rejections: Vec<Rejection>,
    pub lines_read: usize,
}

impl ImportReport {
    /// One-line human-readable result for dialogs and log panes.
    pub fn summary(&self) -> String {
        format!(
            "Imported {} customer(s), skipped {}, read {} line(s)",
            self.inserted,
            self.rejections.len(),
            self.lines_read
        )
    }
}

/// Parse a CSV stream into accepted customers and per-line rejections.
///
/// Each line carries at most four fields; trailing fields may be omitted and
/// default to empty. The phone is normalized and the text fields trimmed
/// before validation. A bad line is recorded and skipped, never fatal; only
/// a stream-level I/O failure aborts the parse. Pure with respect to the
/// store: duplicate detection happens later, at insert time.
pub fn parse_records<R: Read>(input: R) -> Result<ParsedCsv> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let mut parsed = ParsedCsv::default();
    for record in reader.records() {
        parsed.lines_read += 1;
        let line = parsed.lines_read;

        let record = match record {
            Ok(record) => record,
            Err(err) if err.is_io_error() => {
                return Err(err).csv("failed to read CSV file");
            }
            Err(_) => {
                parsed.rejections.push(Rejection {
                    line,
                    reason: RejectReason::Unreadable,
                });
                continue;
            }
        };

        let field = |idx: usize| record.get(idx).unwrap_or("").trim();
        let phone = normalize_phone(field(0));
        let name = field(1);
        let address = field(2);
        let email = field(3);

        let reason = if !is_valid_phone(&phone) {
            Some(RejectReason::InvalidPhone)
        } else if name.is_empty() {
            Some(RejectReason::MissingName)
        } else if address.is_empty() {
            Some(RejectReason::MissingAddress)
        } else {
            email_error(email).map(RejectReason::InvalidEmail)
        };

        match reason {
            Some(reason) => parsed.rejections.push(Rejection { line, reason }),
            None => parsed
                .accepted
                .push((line, Customer::new(&phone, name, address, email))),
        }
    }

    Ok(parsed)
}

/// Write customers to a CSV stream in the given order, one
/// `phone,name,address,email` line per record. No header, no quoting; the
/// flush at the end means a reported success covers the whole write.
pub fn write_records<W: Write>(output: W, customers: &[Customer]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(output);

    for customer in customers {
        writer
            .write_record([
                customer.phone.as_str(),
                customer.name.as_str(),
                customer.address.as_str(),
                customer.email.as_str(),
            ])
            .csv("failed to write CSV record")?;
    }
    writer.flush().io("failed to flush CSV file")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_lines_parse_with_trimming_and_normalization() -> anyhow::Result<()> {
        let input = "(555) 123-4567, Amy Pond , 7 Leadworth Ln ,amy@pond.uk\n";
        let parsed = parse_records(input.as_bytes())?;

        assert_eq!(parsed.lines_read, 1);
        assert!(parsed.rejections.is_empty());
        assert_eq!(
            parsed.accepted,
            vec![(
                1,
                Customer::new("5551234567", "Amy Pond", "7 Leadworth Ln", "amy@pond.uk")
            )]
        );
        Ok(())
    }

    #[test]
    fn omitted_trailing_fields_default_to_empty() -> anyhow::Result<()> {
        let parsed = parse_records("5551234567,Amy,7 Leadworth Ln\n".as_bytes())?;
        assert_eq!(parsed.accepted.len(), 1);
        assert_eq!(parsed.accepted[0].1.email, "");
        Ok(())
    }

    #[test]
    fn bad_lines_are_rejected_without_aborting_the_batch() -> anyhow::Result<()> {
        let input = "\
5551230001,One,Addr One,
123,Two,Addr Two,
5551230003,Three,Addr Three,
5551230004,,Addr Four,
5551230005,Five,,
5551230006,Six,Addr Six,not-an-email
5551230007,Seven,Addr Seven,s@7.io
";
        let parsed = parse_records(input.as_bytes())?;

        assert_eq!(parsed.lines_read, 7);
        assert_eq!(parsed.accepted.len(), 3);
        let reasons: Vec<(usize, RejectReason)> = parsed
            .rejections
            .iter()
            .map(|r| (r.line, r.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (2, RejectReason::InvalidPhone),
                (4, RejectReason::MissingName),
                (5, RejectReason::MissingAddress),
                (6, RejectReason::InvalidEmail(email_error("not-an-email").unwrap())),
            ]
        );
        Ok(())
    }

    #[test]
    fn header_row_fails_the_phone_check_naturally() -> anyhow::Result<()> {
        let input = "phone,name,address,email\n5551234567,Amy,7 Leadworth Ln,\n";
        let parsed = parse_records(input.as_bytes())?;

        assert_eq!(parsed.accepted.len(), 1);
        assert_eq!(
            parsed.rejections,
            vec![Rejection {
                line: 1,
                reason: RejectReason::InvalidPhone
            }]
        );
        Ok(())
    }

    #[test]
    fn embedded_comma_shifts_fields_as_documented() -> anyhow::Result<()> {
        // "12 Main St, Apt 4" splits on the literal comma, so the address
        // truncates and the remainder lands in the email slot.
        let parsed = parse_records("5551234567,Amy,12 Main St, Apt 4\n".as_bytes())?;
        assert_eq!(
            parsed.rejections,
            vec![Rejection {
                line: 1,
                reason: RejectReason::InvalidEmail(email_error("Apt 4").unwrap())
            }]
        );
        Ok(())
    }

    #[test]
    fn non_utf8_line_is_rejected_not_fatal() -> anyhow::Result<()> {
        let mut input = b"5551230001,One,Addr One,\n".to_vec();
        input.extend_from_slice(b"5551230002,Tw\xFFo,Addr Two,\n");
        input.extend_from_slice(b"5551230003,Three,Addr Three,\n");
        let parsed = parse_records(input.as_slice())?;

        assert_eq!(parsed.accepted.len(), 2);
        assert_eq!(
            parsed.rejections,
            vec![Rejection {
                line: 2,
                reason: RejectReason::Unreadable
            }]
        );
        Ok(())
    }

    #[test]
    fn writes_one_unquoted_line_per_customer() -> anyhow::Result<()> {
        let customers = vec![
            Customer::new("1111111", "Bob", "1 First St", "bob@ex.com"),
            Customer::new("2222222", "amy", "2 Second St", ""),
        ];
        let mut out = Vec::new();
        write_records(&mut out, &customers)?;

        assert_eq!(
            String::from_utf8(out)?,
            "1111111,Bob,1 First St,bob@ex.com\n2222222,amy,2 Second St,\n"
        );
        Ok(())
    }

    #[test]
    fn summary_reports_all_three_counts() {
        let report = ImportReport {
            inserted: 5,
            rejections: vec![
                Rejection {
                    line: 2,
                    reason: RejectReason::InvalidPhone,
                },
                Rejection {
                    line: 3,
                    reason: RejectReason::DuplicatePhone,
                },
            ],
            lines_read: 7,
        };
        assert_eq!(report.summary(), "Imported 5 customer(s), skipped 2, read 7 line(s)");
    }
}
