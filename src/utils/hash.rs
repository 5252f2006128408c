use sha2::{Digest, Sha256};

/// 身分雜湊保留的十六進位字元數（64 位元的熵）
const STABLE_ID_LEN: usize = 16;

/// 對管線符號串接的識別欄位做 SHA-256，取前 16 個十六進位字元。
/// 輸出與平台、整數寬度無關；相同輸入永遠得到相同 ID。
pub fn stable_id(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(parts.join("|").as_bytes());
    let digest = hasher.finalize();
    let mut hex = hex::encode(digest);
    hex.truncate(STABLE_ID_LEN);
    hex
}
