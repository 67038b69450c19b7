use crate::domain::order::OrderPayload;
use crate::error::{OrderError, Result};
use csv::StringRecord;
use std::io::Read;

/// Reads order requests from a CSV source.
///
/// Expects the columns `phone_number,package,payment_method,email` in any
/// order. Fields are trimmed and short rows are tolerated: missing trailing
/// fields read as empty so the form validation reports them.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    /// Creates a new `OrderReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Resolves the header, then lazily yields one order per row.
    ///
    /// Fails up front if a column is absent from the header.
    pub fn orders(mut self) -> Result<impl Iterator<Item = Result<OrderPayload>>> {
        let columns = Columns::locate(self.reader.headers()?)?;
        Ok(self
            .reader
            .into_records()
            .map(move |record| record.map(|r| columns.payload(&r)).map_err(OrderError::from)))
    }
}

/// Header positions of the order columns.
struct Columns {
    phone_number: usize,
    package: usize,
    payment_method: usize,
    email: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| OrderError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            phone_number: position("phone_number")?,
            package: position("package")?,
            payment_method: position("payment_method")?,
            email: position("email")?,
        })
    }

    fn payload(&self, record: &StringRecord) -> OrderPayload {
        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        OrderPayload {
            phone_number: field(self.phone_number),
            package_id: field(self.package),
            payment_method_id: field(self.payment_method),
            email: field(self.email),
        }
    }
}
