use serde::{Deserialize, Serialize};

/// 分析任务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// 摘要
    #[default]
    Summarize,
    /// 信息抽取（需要查询）
    Extract,
    /// 双文档对比
    Compare,
    /// 问答（需要查询）
    Qa,
}

impl Task {
    pub const ALL: [Task; 4] = [Task::Summarize, Task::Extract, Task::Compare, Task::Qa];

    /// 获取接口代码
    pub fn code(self) -> &'static str {
        match self {
            Task::Summarize => "summarize",
            Task::Extract => "extract",
            Task::Compare => "compare",
            Task::Qa => "qa",
        }
    }

    /// 获取显示名称
    pub fn label(self) -> &'static str {
        match self {
            Task::Summarize => "Summarize",
            Task::Extract => "Extract",
            Task::Compare => "Compare",
            Task::Qa => "Q&A",
        }
    }

    /// 从接口代码解析任务
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// 只有对比任务需要第二份文档
    pub fn requires_second_document(self) -> bool {
        matches!(self, Task::Compare)
    }

    /// 抽取和问答需要查询内容
    pub fn requires_query(self) -> bool {
        matches!(self, Task::Extract | Task::Qa)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "q&a" => Ok(Task::Qa),
            other => Self::from_code(other).ok_or_else(|| {
                format!("未知任务 '{}'，可选: summarize, extract, compare, qa", s)
            }),
        }
    }
}

/// 输出语言
///
/// 仅作为选择项透传给服务端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// 英语
    #[default]
    #[serde(rename = "en")]
    English,
    /// 目标语言（奥里亚语）
    #[serde(rename = "or")]
    Odia,
    /// 双语
    #[serde(rename = "bilingual")]
    Bilingual,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Odia, Language::Bilingual];

    /// 获取接口代码
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Odia => "or",
            Language::Bilingual => "bilingual",
        }
    }

    /// 获取显示名称
    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Odia => "Odia",
            Language::Bilingual => "Bilingual",
        }
    }

    /// 从接口代码解析语言
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::from_code(&normalized)
            .or_else(|| Self::ALL.into_iter().find(|l| l.label().to_lowercase() == normalized))
            .ok_or_else(|| format!("未知语言 '{}'，可选: en, or, bilingual", s))
    }
}
