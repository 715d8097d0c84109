//! JVM opcodes.

use std::fmt;

/// A JVM instruction opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opcode(pub u8);

macro_rules! opcodes {
    ($($name:ident = $value:literal => $mnemonic:literal),* $(,)?) => {
        impl Opcode {
            $(pub const $name: Opcode = Opcode($value);)*

            /// Assembler mnemonic, `None` for opcodes not listed here.
            pub fn mnemonic(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some($mnemonic),)*
                    _ => None,
                }
            }
        }
    };
}

opcodes! {
    NOP = 0 => "nop",
    ACONST_NULL = 1 => "aconst_null",
    ICONST_0 = 3 => "iconst_0",
    ICONST_1 = 4 => "iconst_1",
    BIPUSH = 16 => "bipush",
    SIPUSH = 17 => "sipush",
    LDC = 18 => "ldc",
    ILOAD = 21 => "iload",
    LLOAD = 22 => "lload",
    FLOAD = 23 => "fload",
    DLOAD = 24 => "dload",
    ALOAD = 25 => "aload",
    ISTORE = 54 => "istore",
    ASTORE = 58 => "astore",
    POP = 87 => "pop",
    DUP = 89 => "dup",
    IADD = 96 => "iadd",
    GOTO = 167 => "goto",
    IRETURN = 172 => "ireturn",
    LRETURN = 173 => "lreturn",
    FRETURN = 174 => "freturn",
    DRETURN = 175 => "dreturn",
    ARETURN = 176 => "areturn",
    RETURN = 177 => "return",
    GETSTATIC = 178 => "getstatic",
    PUTSTATIC = 179 => "putstatic",
    GETFIELD = 180 => "getfield",
    PUTFIELD = 181 => "putfield",
    INVOKEVIRTUAL = 182 => "invokevirtual",
    INVOKESPECIAL = 183 => "invokespecial",
    INVOKESTATIC = 184 => "invokestatic",
    INVOKEINTERFACE = 185 => "invokeinterface",
    INVOKEDYNAMIC = 186 => "invokedynamic",
    NEW = 187 => "new",
    NEWARRAY = 188 => "newarray",
    ANEWARRAY = 189 => "anewarray",
    ATHROW = 191 => "athrow",
    CHECKCAST = 192 => "checkcast",
    INSTANCEOF = 193 => "instanceof",
}

impl Opcode {
    /// Any of the `*RETURN` instructions, `RETURN` included.
    pub fn is_return(self) -> bool {
        (Self::IRETURN.0..=Self::RETURN.0).contains(&self.0)
    }
}

impl From<u8> for Opcode {
    fn from(value: u8) -> Self {
        Opcode(value)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => f.write_str(name),
            None => write!(f, "opcode {}", self.0),
        }
    }
}
