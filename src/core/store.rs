use crate::domain::model::ParseResult;

/// 呼叫端持有的結果把手，取代行程級的單例快取。
/// set 整體替換並交回上一份結果；絕不原地合併。
#[derive(Debug, Default)]
pub struct ResultStore {
    current: Option<ParseResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, result: ParseResult) -> Option<ParseResult> {
        self.current.replace(result)
    }

    pub fn get(&self) -> Option<&ParseResult> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
