use super::{EconomyResult, EconomySystem};

impl EconomySystem {
    pub fn display_status(&self, nation: &str) -> EconomyResult<String> {
        let account = self.account(nation)?;
        Ok(format!(
            "Economic points: {}, Supply points: {}",
            account.economic_points, account.supply_points
        ))
    }

    /// Points, bases with their remaining supply, and held key points.
    pub fn generate_report(&self, nation: &str) -> EconomyResult<String> {
        let account = self.account(nation)?;
        let mut report = format!(
            "=== Economic report: {nation} ===\n\
             Economic points: {}\n\
             Supply points: {}\n\
             \n--- Bases ---\n",
            account.economic_points, account.supply_points
        );
        for base in &account.bases {
            let (x, y) = base.coords;
            report.push_str(&format!(
                "Base at ({x}, {y}) with supply limit {}\n",
                base.supply_limit
            ));
        }
        report.push_str(&format!(
            "Total base supply: {}\n",
            account.total_base_supply()
        ));

        if !account.key_points.is_empty() {
            report.push_str("\n--- Key points ---\n");
            for (hex, key_point) in &account.key_points {
                report.push_str(&format!(
                    "{} on hex {hex} worth {}\n",
                    key_point.kind, key_point.value
                ));
            }
        }
        Ok(report)
    }

    pub fn show_history(&self, nation: &str) -> EconomyResult<String> {
        let account = self.account(nation)?;
        let mut out = format!("=== Economic history: {nation} ===\n");
        if account.history.dropped() > 0 {
            out.push_str(&format!(
                "({} older entries dropped)\n",
                account.history.dropped()
            ));
        }
        for entry in account.history.iter() {
            out.push_str(&format!("[turn {}] {}\n", entry.turn, entry.message));
        }
        Ok(out)
    }
}
