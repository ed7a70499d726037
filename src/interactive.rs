use crate::domain::model::LookupResult;
use crate::domain::ports::PlaceLookup;
use crate::utils::error::Result;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Google,
    Yelp,
}

impl Provider {
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Google => "Google Places",
            Provider::Yelp => "Yelp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub business_name: String,
    pub location: String,
    pub provider: Provider,
}

/// 命令列提問，輸入輸出可替換以便測試
pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    /// EOF 時回傳 None
    fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "? {} ", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn business_name(&mut self) -> Result<Option<String>> {
        loop {
            match self.ask("Enter the business name:")? {
                None => return Ok(None),
                Some(name) if name.is_empty() => {
                    writeln!(self.output, "Business name is required")?;
                }
                Some(name) => return Ok(Some(name)),
            }
        }
    }

    pub fn location(&mut self, default: &str) -> Result<Option<String>> {
        let answer = self.ask(&format!("Enter the location ({}):", default))?;
        Ok(answer.map(|location| {
            if location.is_empty() {
                default.to_string()
            } else {
                location
            }
        }))
    }

    pub fn provider(&mut self, yelp_available: bool) -> Result<Option<Provider>> {
        if !yelp_available {
            return Ok(Some(Provider::Google));
        }

        loop {
            match self.ask("Choose a provider [google/yelp] (google):")? {
                None => return Ok(None),
                Some(choice) => match choice.to_lowercase().as_str() {
                    "" | "g" | "google" => return Ok(Some(Provider::Google)),
                    "y" | "yelp" => return Ok(Some(Provider::Yelp)),
                    other => writeln!(self.output, "Unknown provider '{}'", other)?,
                },
            }
        }
    }

    pub fn search_request(
        &mut self,
        default_location: &str,
        yelp_available: bool,
    ) -> Result<Option<SearchRequest>> {
        let Some(business_name) = self.business_name()? else {
            return Ok(None);
        };
        let Some(location) = self.location(default_location)? else {
            return Ok(None);
        };
        let Some(provider) = self.provider(yelp_available)? else {
            return Ok(None);
        };

        Ok(Some(SearchRequest {
            business_name,
            location,
            provider,
        }))
    }

    pub fn cancelled(&mut self) -> Result<()> {
        writeln!(self.output, "Operation cancelled")?;
        Ok(())
    }

    /// 找不到結果不算錯誤；其他錯誤往外拋
    pub async fn search(
        &mut self,
        request: &SearchRequest,
        lookup: &dyn PlaceLookup,
    ) -> Result<Option<Vec<LookupResult>>> {
        writeln!(
            self.output,
            "\nSearching for \"{}\" in {} using {}...\n",
            request.business_name,
            request.location,
            request.provider.label()
        )?;

        match lookup.lookup(&request.business_name).await {
            Ok(results) => {
                writeln!(self.output, "✅ Business found!")?;
                writeln!(self.output, "{}", serde_json::to_string_pretty(&results)?)?;
                Ok(Some(results))
            }
            Err(e) if e.is_not_found() => {
                writeln!(self.output, "❌ No results found")?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
