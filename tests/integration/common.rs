use async_trait::async_trait;
use pc_quote::quote::{MailTransport, OutgoingEmail};
use pc_quote::{MailError, MailResult};
use std::sync::Mutex;

/// A retailer search page with three listing cells
///
/// The second cell has no price, so it is skipped but keeps index 1.
pub const LISTING_PAGE: &str = r#"
<html><body>
<div class="items-grid-view">
  <div class="item-cell">
    <div class="item-container">
      <a class="item-img" href="/p/1"><img src="https://c1.example.com/7800x3d.jpg" alt=""></a>
      <div class="item-info">
        <a class="item-title" href="/p/1">AMD Ryzen 7 7800X3D 8-Core</a>
        <ul class="price">
          <li class="price-current">$<strong>1,049</strong><sup>.99</sup></li>
        </ul>
      </div>
    </div>
  </div>
  <div class="item-cell">
    <a class="item-title" href="/p/2">Intel Core i9 (Sold Out)</a>
    <ul class="price"><li class="price-current"></li></ul>
  </div>
  <div class="item-cell">
    <a class="item-img" href="/p/3"><img src="/images/5600.jpg"></a>
    <a class="item-title" href="/p/3">  AMD Ryzen 5 5600  </a>
    <ul class="price"><li class="price-current">$<strong>129</strong><sup>.00</sup></li></ul>
  </div>
</div>
</body></html>
"#;

/// Mail transport that records messages instead of sending them
#[derive(Default)]
pub struct RecordingTransport {
    pub fail: bool,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingTransport {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: OutgoingEmail) -> MailResult<()> {
        if self.fail {
            return Err(MailError::Smtp("421 smtp.example.com unavailable".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}
