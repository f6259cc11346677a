//! Encode a command message, route it by header, decode it back

use std::sync::{Arc, LazyLock};

use binstream::{Endianness, FieldKind, Message, MessageHeader, ScalarKind, Schema};

const CMD_HALL: i32 = 1;
const SUB_UPDATE_MONEY: i32 = 3;

static UPDATE_MONEY: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::message("UpdateMoney")
        .field("userId", "user_id", FieldKind::scalar(ScalarKind::U32))
        .field("money", "money", FieldKind::scalar(ScalarKind::F64))
        .field("reason", "reason", FieldKind::string())
        .build()
        .expect("valid schema")
});

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("binstream command roundtrip");
    println!("===========================\n");

    let mut msg = Message::with_cmd(&UPDATE_MONEY, CMD_HALL, SUB_UPDATE_MONEY)?;
    msg.set("user_id", 10_086u32)?;
    msg.set("money", 4.5f64)?;
    msg.set("reason", "这是一个中文的测试")?;

    let encoded = msg.encode()?;
    println!("Encoded to {} bytes: {:02x?}", encoded.len(), encoded.as_ref());

    let header = MessageHeader::peek(&encoded, Endianness::Big)?;
    println!("Routing key: {:?}", header.route());

    let mut decoded = Message::new(&UPDATE_MONEY);
    if !decoded.decode(encoded) {
        return Err("decode failed".into());
    }
    println!(
        "Decoded: user_id={:?} money={:?} reason={:?}",
        decoded.get_u32("user_id"),
        decoded.get_f64("money"),
        decoded.get_str("reason"),
    );

    Ok(())
}
