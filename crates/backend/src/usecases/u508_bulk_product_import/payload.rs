use contracts::domain::a007_storefront_product::ProductRecord;

use super::error::ImportError;
use super::slot::{SignedField, UploadSlot, PAYLOAD_MIME_TYPE};

/// Имя поля формы, в котором передается сам файл
pub const FILE_FIELD: &str = "file";

/// Имя подписанного поля с путем загруженного файла
pub const KEY_FIELD: &str = "key";

/// Сериализовать пакет в JSONL: одна строка на товар, каждая с `\n` в конце
pub fn to_ndjson(records: &[ProductRecord]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    for record in records {
        serde_json::to_writer(&mut buf, record)?;
        buf.push(b'\n');
    }
    Ok(buf)
}

/// Готовая к отправке multipart-форма
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPayload {
    /// Подписанные поля слота без `file`, в исходном порядке
    pub fields: Vec<SignedField>,
    /// Имя файла в части `file` (равно `key`)
    pub file_name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl MultipartPayload {
    /// Собрать форму для слота
    ///
    /// `key` ищется до любой сетевой активности: без него следующий шаг
    /// не сможет сослаться на файл.
    pub fn for_slot(slot: &UploadSlot, content: Vec<u8>) -> Result<Self, ImportError> {
        let key = slot.field(KEY_FIELD)?;

        let fields = slot
            .signed_fields
            .iter()
            .filter(|f| f.name != FILE_FIELD)
            .cloned()
            .collect();

        Ok(Self {
            fields,
            file_name: key.to_string(),
            mime_type: PAYLOAD_MIME_TYPE.to_string(),
            content,
        })
    }

    /// Путь файла в хранилище, который передается в bulk-мутацию
    pub fn staged_path(&self) -> &str {
        &self.file_name
    }

    /// Имена частей формы в порядке отправки (включая финальный `file`)
    pub fn part_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(std::iter::once(FILE_FIELD))
            .collect()
    }
}
