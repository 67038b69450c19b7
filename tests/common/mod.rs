#![allow(dead_code)]

use async_trait::async_trait;
use gigorder::domain::order::{OrderPayload, OrderReceipt};
use gigorder::domain::ports::OrderSubmitter;
use gigorder::error::SubmissionError;
use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts calls and answers with a fixed outcome.
#[derive(Clone)]
pub struct ScriptedSubmitter {
    pub calls: Arc<AtomicUsize>,
    pub outcome: Result<OrderReceipt, SubmissionError>,
}

impl ScriptedSubmitter {
    pub fn accepting(confirmation_id: &str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            outcome: Ok(OrderReceipt {
                confirmation_id: confirmation_id.to_string(),
            }),
        }
    }

    pub fn rejecting(code: &str) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            outcome: Err(SubmissionError::Rejected {
                code: code.to_string(),
                message: "payment declined".to_string(),
            }),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderSubmitter for ScriptedSubmitter {
    async fn place_order(&self, _payload: &OrderPayload) -> Result<OrderReceipt, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// A random phone number in one of the accepted layouts.
pub fn random_valid_phone(rng: &mut impl Rng) -> String {
    let mut digits = |n: usize| -> String {
        (0..n)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    };
    let (a, b, c, d) = (digits(3), digits(3), digits(2), digits(2));
    match rng.gen_range(0..4) {
        0 => format!("+7 ({a}) {b}-{c}-{d}"),
        1 => format!("8 {a} {b} {c} {d}"),
        2 => format!("8{a}{b}{c}{d}"),
        _ => format!("({a}) {b}-{c}-{d}"),
    }
}

pub fn generate_orders_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["phone_number", "package", "payment_method", "email"])?;

    let packages = ["basic", "popular", "premium"];
    let methods = ["card", "yandex", "qiwi", "webmoney", "paypal", "apple"];
    for i in 0..rows {
        wtr.write_record([
            "89991234567",
            packages[i % packages.len()],
            methods[i % methods.len()],
            &format!("user{i}@example.com"),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
