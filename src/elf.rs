//! ELF file format definitions.
//!
//! The subset of the format vocabulary needed by the annotation decoder:
//! identification bytes, header enumerations, segment and section types and
//! flags, symbol classification, and the relocation-type codes covered by the
//! mnemonic tables.

/// The magic bytes at the start of every ELF image.
pub const ELFMAG: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// File offset of the class (register size) identification byte.
pub const EI_CLASS: u64 = 4;
/// File offset of the data (byte order) identification byte.
pub const EI_DATA: u64 = 5;
/// File offset of the version identification byte.
pub const EI_VERSION: u64 = 6;
/// File offset of the OS ABI identification byte.
pub const EI_OSABI: u64 = 7;
/// File offset of the ABI version identification byte.
pub const EI_ABIVERSION: u64 = 8;
/// Size of the identification block at the start of the header.
pub const EI_NIDENT: u64 = 16;

/// 32-bit object file class.
pub const ELFCLASS32: u8 = 1;
/// 64-bit object file class.
pub const ELFCLASS64: u8 = 2;

/// Little-endian data encoding.
pub const ELFDATA2LSB: u8 = 1;
/// Big-endian data encoding.
pub const ELFDATA2MSB: u8 = 2;

/// The current (and only defined) format version.
pub const EV_CURRENT: u8 = 1;

/// System V OS ABI.
pub const ELFOSABI_NONE: u8 = 0;

/// No file type.
pub const ET_NONE: u16 = 0;
/// Relocatable object file.
pub const ET_REL: u16 = 1;
/// Executable file.
pub const ET_EXEC: u16 = 2;
/// Shared object file.
pub const ET_DYN: u16 = 3;
/// Core dump file.
pub const ET_CORE: u16 = 4;

/// Intel 80386.
pub const EM_386: u16 = 3;
/// MIPS I.
pub const EM_MIPS: u16 = 8;
/// ARM.
pub const EM_ARM: u16 = 0x28;
/// AMD x86-64.
pub const EM_X86_64: u16 = 0x3e;
/// ARM 64-bit (AArch64).
pub const EM_AARCH64: u16 = 0xb7;
/// RISC-V.
pub const EM_RISCV: u16 = 0xf3;

/// Unused program header entry.
pub const PT_NULL: u32 = 0;
/// Loadable segment.
pub const PT_LOAD: u32 = 1;
/// Dynamic linking information.
pub const PT_DYNAMIC: u32 = 2;
/// Interpreter path.
pub const PT_INTERP: u32 = 3;
/// Auxiliary information.
pub const PT_NOTE: u32 = 4;
/// Reserved, semantics unspecified.
pub const PT_SHLIB: u32 = 5;
/// The program header table itself.
pub const PT_PHDR: u32 = 6;
/// Thread-local storage template.
pub const PT_TLS: u32 = 7;

/// Segment is executable.
pub const PF_X: u32 = 1;
/// Segment is writable.
pub const PF_W: u32 = 2;
/// Segment is readable.
pub const PF_R: u32 = 4;

/// Unused section header entry.
pub const SHT_NULL: u32 = 0;
/// Program data.
pub const SHT_PROGBITS: u32 = 1;
/// Symbol table.
pub const SHT_SYMTAB: u32 = 2;
/// String table.
pub const SHT_STRTAB: u32 = 3;
/// Relocations with explicit addends.
pub const SHT_RELA: u32 = 4;
/// Symbol hash table.
pub const SHT_HASH: u32 = 5;
/// Dynamic linking information.
pub const SHT_DYNAMIC: u32 = 6;
/// Notes.
pub const SHT_NOTE: u32 = 7;
/// Uninitialized space, occupies no file bytes.
pub const SHT_NOBITS: u32 = 8;
/// Relocations without explicit addends.
pub const SHT_REL: u32 = 9;
/// Reserved, semantics unspecified.
pub const SHT_SHLIB: u32 = 10;
/// Dynamic linker symbol table.
pub const SHT_DYNSYM: u32 = 11;

/// Section is writable at run time.
pub const SHF_WRITE: u64 = 1;
/// Section occupies memory at run time.
pub const SHF_ALLOC: u64 = 2;
/// Section contains executable instructions.
pub const SHF_EXECINSTR: u64 = 4;

/// Symbol type is unspecified.
pub const STT_NOTYPE: u8 = 0;
/// Symbol is a data object.
pub const STT_OBJECT: u8 = 1;
/// Symbol is a code object.
pub const STT_FUNC: u8 = 2;
/// Symbol is associated with a section.
pub const STT_SECTION: u8 = 3;
/// Symbol names a source file.
pub const STT_FILE: u8 = 4;
/// Symbol is an uninitialized common block.
pub const STT_COMMON: u8 = 5;
/// Symbol is a thread-local storage entity.
pub const STT_TLS: u8 = 6;
/// Number of defined symbol types.
pub const STT_NUM: u8 = 7;

/// Default symbol visibility rules.
pub const STV_DEFAULT: u8 = 0;
/// Processor-specific hidden visibility.
pub const STV_INTERNAL: u8 = 1;
/// Symbol is unavailable to other modules.
pub const STV_HIDDEN: u8 = 2;
/// Not preemptible, not exported.
pub const STV_PROTECTED: u8 = 3;

/// Undefined section reference.
pub const SHN_UNDEF: u16 = 0;
/// Start of the reserved section index range.
pub const SHN_LORESERVE: u16 = 0xff00;
/// The symbol value is absolute, not relative to any section.
pub const SHN_ABS: u16 = 0xfff1;
/// The symbol labels a common block.
pub const SHN_COMMON: u16 = 0xfff2;
/// The section index is found elsewhere (also the end of the reserved range).
pub const SHN_XINDEX: u16 = 0xffff;

/// No relocation.
pub const R_386_NONE: u32 = 0;
/// Direct 32-bit.
pub const R_386_32: u32 = 1;
/// PC-relative 32-bit.
pub const R_386_PC32: u32 = 2;
/// 32-bit GOT entry.
pub const R_386_GOT32: u32 = 3;
/// 32-bit PLT address.
pub const R_386_PLT32: u32 = 4;
/// Copy symbol at run time.
pub const R_386_COPY: u32 = 5;
/// Create GOT entry.
pub const R_386_GLOB_DAT: u32 = 6;
/// Create PLT entry.
pub const R_386_JMP_SLOT: u32 = 7;
/// Adjust by image base.
pub const R_386_RELATIVE: u32 = 8;
/// 32-bit offset to GOT.
pub const R_386_GOTOFF: u32 = 9;
/// 32-bit PC-relative offset to GOT.
pub const R_386_GOTPC: u32 = 10;

/// No relocation.
pub const R_X86_64_NONE: u32 = 0;
/// Direct 64-bit.
pub const R_X86_64_64: u32 = 1;
/// PC-relative 32-bit signed.
pub const R_X86_64_PC32: u32 = 2;
/// 32-bit GOT entry.
pub const R_X86_64_GOT32: u32 = 3;
/// 32-bit PLT address.
pub const R_X86_64_PLT32: u32 = 4;
/// Copy symbol at run time.
pub const R_X86_64_COPY: u32 = 5;
/// Create GOT entry.
pub const R_X86_64_GLOB_DAT: u32 = 6;
/// Create PLT entry.
pub const R_X86_64_JUMP_SLOT: u32 = 7;
/// Adjust by image base.
pub const R_X86_64_RELATIVE: u32 = 8;
/// PC-relative 32-bit signed offset to GOT entry.
pub const R_X86_64_GOTPCREL: u32 = 9;
/// Direct 32-bit zero-extended.
pub const R_X86_64_32: u32 = 10;
/// Direct 32-bit sign-extended.
pub const R_X86_64_32S: u32 = 11;
/// Direct 16-bit zero-extended.
pub const R_X86_64_16: u32 = 12;
/// PC-relative 16-bit signed.
pub const R_X86_64_PC16: u32 = 13;
/// Direct 8-bit sign-extended.
pub const R_X86_64_8: u32 = 14;
/// PC-relative 8-bit signed.
pub const R_X86_64_PC8: u32 = 15;
/// ID of the module containing the symbol.
pub const R_X86_64_DTPMOD64: u32 = 16;
/// Offset in the module's TLS block.
pub const R_X86_64_DTPOFF64: u32 = 17;
/// Offset in the initial TLS block.
pub const R_X86_64_TPOFF64: u32 = 18;
/// PC-relative offset to the GD TLS descriptor in the GOT.
pub const R_X86_64_TLSGD: u32 = 19;
/// PC-relative offset to the LD TLS descriptor in the GOT.
pub const R_X86_64_TLSLD: u32 = 20;
/// Offset in the module's TLS block, 32-bit.
pub const R_X86_64_DTPOFF32: u32 = 21;
/// PC-relative offset to the IE GOT entry.
pub const R_X86_64_GOTTPOFF: u32 = 22;
/// Offset in the initial TLS block, 32-bit.
pub const R_X86_64_TPOFF32: u32 = 23;
/// PC-relative 64-bit.
pub const R_X86_64_PC64: u32 = 24;
/// 64-bit offset to GOT base.
pub const R_X86_64_GOTOFF64: u32 = 25;
/// 32-bit signed PC-relative offset to GOT.
pub const R_X86_64_GOTPC32: u32 = 26;
