//! Engine-result classification.
//!
//! The ledger node reports every transaction outcome as a short result
//! code. Codes in the `tes` family are successes; everything else is a
//! rejection. `describe` is a fixed table of known codes; `classify`
//! turns a code into a success or a [`LedgerError::EngineResult`].

use super::error::LedgerError;

/// Fallback message for codes the table does not know about.
const GENERIC_FAILURE: &str = "The transaction was unsuccessful.";

/// Look up the human-readable description of a known engine-result code.
#[must_use]
pub fn describe(code: &str) -> Option<&'static str> {
    let message = match code {
        // -- tec: the transaction failed but a fee was claimed -----------
        "tecCLAIM" => "The fee was claimed but the transaction did not achieve its intended purpose.",
        "tecAMM_ACCOUNT" => "The operation is not allowed on an AMM pseudo-account.",
        "tecAMM_BALANCE" => "The AMM has insufficient balance for this operation.",
        "tecAMM_EMPTY" => "The AMM has no assets and must be funded first.",
        "tecAMM_FAILED" => "The AMM operation failed.",
        "tecAMM_INVALID_TOKENS" => "The AMM deposit or withdrawal used invalid LP tokens.",
        "tecAMM_NOT_EMPTY" => "The operation requires an empty AMM.",
        "tecARRAY_EMPTY" => "A required array field was empty.",
        "tecARRAY_TOO_LARGE" => "An array field exceeded the allowed size.",
        "tecCANT_ACCEPT_OWN_NFTOKEN_OFFER" => "An account cannot accept its own NFToken offer.",
        "tecCRYPTOCONDITION_ERROR" => "The crypto-condition or its fulfillment was malformed or did not match.",
        "tecDIR_FULL" => "The owner directory is full and cannot hold more entries.",
        "tecDST_TAG_NEEDED" => "The destination account requires a destination tag.",
        "tecDUPLICATE" => "An object with this identifier already exists.",
        "tecEMPTY_DID" => "The DID transaction would create an empty DID entry.",
        "tecEXPIRED" => "The object or offer has expired.",
        "tecFAILED_PROCESSING" => "The transaction failed during processing.",
        "tecFROZEN" => "The trust line is frozen and cannot be used.",
        "tecHAS_OBLIGATIONS" => "The account cannot be deleted because it is linked to ledger objects.",
        "tecINCOMPLETE" => "The operation left a ledger object in an incomplete state.",
        "tecINSUF_RESERVE_LINE" => "There is an insufficient reserve to add the trust line.",
        "tecINSUF_RESERVE_OFFER" => "There is an insufficient reserve to create the offer.",
        "tecINSUFF_FEE" => "The account has insufficient XRP to pay the fee.",
        "tecINSUFFICIENT_FUNDS" => "One of the accounts involved does not hold enough funds.",
        "tecINSUFFICIENT_PAYMENT" => "The payment amount is insufficient for the requested operation.",
        "tecINSUFFICIENT_RESERVE" => "The account balance is below the reserve required by this operation.",
        "tecINTERNAL" => "An internal error occurred while applying the transaction.",
        "tecINVALID_UPDATE_TIME" => "The oracle update time is invalid or not newer than the previous one.",
        "tecINVARIANT_FAILED" => "A ledger invariant check failed while applying the transaction.",
        "tecKILLED" => "The offer was killed because it could not be filled under its conditions.",
        "tecLOCKED" => "The asset is locked and cannot be moved.",
        "tecMAX_SEQUENCE_REACHED" => "A sequence or counter field has reached its maximum value.",
        "tecNEED_MASTER_KEY" => "This operation requires the master key.",
        "tecNFTOKEN_BUY_SELL_MISMATCH" => "The NFToken buy and sell offers do not match.",
        "tecNFTOKEN_OFFER_TYPE_MISMATCH" => "The referenced NFToken offer is of the wrong type.",
        "tecNO_ALTERNATIVE_KEY" => "The account has no alternative signing key configured.",
        "tecNO_AUTH" => "The operation is not authorized by the issuer.",
        "tecNO_DST" => "The destination account does not exist.",
        "tecNO_DST_INSUF_XRP" => "The destination account does not exist and the payment is too small to create it.",
        "tecNO_ENTRY" => "The requested ledger entry does not exist.",
        "tecNO_ISSUER" => "The issuer account does not exist.",
        "tecNO_LINE" => "No trust line exists between the accounts.",
        "tecNO_LINE_INSUF_RESERVE" => "There is an insufficient reserve to create the required trust line.",
        "tecNO_LINE_REDUNDANT" => "The trust line change is redundant; no such line exists.",
        "tecNO_PERMISSION" => "The sender does not have permission for this operation.",
        "tecNO_REGULAR_KEY" => "The account has no regular key configured.",
        "tecNO_SUITABLE_NFTOKEN_PAGE" => "No suitable NFToken page is available for the token.",
        "tecNO_TARGET" => "The target ledger object does not exist.",
        "tecOBJECT_NOT_FOUND" => "The referenced ledger object was not found.",
        "tecOVERSIZE" => "The transaction produced metadata that is too large.",
        "tecOWNERS" => "The account owns ledger objects that block this operation.",
        "tecPATH_DRY" => "The payment path lacks the liquidity to deliver any value.",
        "tecPATH_PARTIAL" => "The payment path could not deliver the full amount.",
        "tecTOKEN_PAIR_NOT_FOUND" => "The requested token pair does not exist.",
        "tecTOO_SOON" => "The operation was attempted before it is allowed.",
        "tecUNFUNDED" => "The account is unfunded and cannot perform the operation.",
        "tecUNFUNDED_ADD" => "The wallet addition is unfunded.",
        "tecUNFUNDED_AMM" => "The AMM creation is unfunded.",
        "tecUNFUNDED_OFFER" => "The offer is unfunded; the account cannot cover what it promises.",
        "tecUNFUNDED_PAYMENT" => "The account cannot cover the payment amount plus the fee.",
        "tecXCHAIN_ACCOUNT_CREATE_PAST" => "The cross-chain account-create claim has already been processed.",
        "tecXCHAIN_BAD_CLAIM_ID" => "The cross-chain claim ID is invalid.",
        "tecXCHAIN_CLAIM_NO_QUORUM" => "The cross-chain claim lacks a quorum of attestations.",
        "tecXCHAIN_INSUFF_CREATE_AMOUNT" => "The cross-chain create amount is insufficient.",
        "tecXCHAIN_NO_CLAIM_ID" => "The referenced cross-chain claim ID does not exist.",
        "tecXCHAIN_PROOF_UNKNOWN_KEY" => "The cross-chain proof used an unknown signing key.",
        "tecXCHAIN_SENDING_ACCOUNT_MISMATCH" => "The cross-chain sending account does not match the claim.",

        // -- tef: failure, fee not claimed -------------------------------
        "tefALREADY" => "The same exact transaction has already been applied.",
        "tefBAD_ADD_AUTH" => "The transaction is not authorized to add the account.",
        "tefBAD_AUTH" => "The transaction's signature is not authorized for this account.",
        "tefBAD_AUTH_MASTER" => "The signature matches a disabled master key.",
        "tefBAD_LEDGER" => "The ledger is in an unexpected state.",
        "tefBAD_QUORUM" => "The signatures do not meet the signer list's quorum.",
        "tefBAD_SIGNATURE" => "A signature on the transaction is invalid.",
        "tefCREATED" => "The account has already been created.",
        "tefEXCEPTION" => "An exception occurred while processing the transaction.",
        "tefFAILURE" => "The transaction failed to be applied.",
        "tefINTERNAL" => "An internal error occurred while processing the transaction.",
        "tefINVARIANT_FAILED" => "An invariant check failed while claiming the fee.",
        "tefMASTER_DISABLED" => "The master key is disabled for this account.",
        "tefMAX_LEDGER" => "The ledger sequence has exceeded the transaction's LastLedgerSequence.",
        "tefNFTOKEN_IS_NOT_TRANSFERABLE" => "The NFToken is not transferable.",
        "tefNO_AUTH_REQUIRED" => "The issuer does not require authorization, so none can be granted.",
        "tefNO_TICKET" => "The referenced ticket does not exist.",
        "tefNOT_MULTI_SIGNING" => "The account does not have a signer list for multi-signing.",
        "tefPAST_SEQ" => "The transaction's sequence number has already been used.",
        "tefTOO_BIG" => "The transaction affects too many ledger entries.",
        "tefWRONG_PRIOR" => "The transaction's prior-transaction requirement was not met.",

        // -- tel: local node error ---------------------------------------
        "telBAD_DOMAIN" => "The domain value is malformed.",
        "telBAD_PATH_COUNT" => "The payment contains too many paths.",
        "telBAD_PUBLIC_KEY" => "A public key in the transaction is malformed.",
        "telCAN_NOT_QUEUE" => "The transaction cannot be queued by this server.",
        "telCAN_NOT_QUEUE_BALANCE" => "The transaction cannot be queued; queued fees exceed the balance.",
        "telCAN_NOT_QUEUE_BLOCKED" => "The transaction cannot be queued; it is blocked by a queued transaction.",
        "telCAN_NOT_QUEUE_BLOCKS" => "The transaction cannot be queued; it would block queued transactions.",
        "telCAN_NOT_QUEUE_FEE" => "The transaction cannot be queued; the fee is too low to replace.",
        "telCAN_NOT_QUEUE_FULL" => "The transaction cannot be queued; the queue is full.",
        "telENV_RPC_FAILED" => "The local RPC environment rejected the transaction.",
        "telFAILED_PROCESSING" => "The server failed to process the transaction locally.",
        "telINSUF_FEE_P" => "The fee is insufficient for the current network load.",
        "telLOCAL_ERROR" => "A local error occurred on the submitting server.",
        "telNETWORK_ID_MAKES_TX_NON_CANONICAL" => "The NetworkID field makes the transaction non-canonical on this network.",
        "telNO_DST_PARTIAL" => "A partial payment cannot create the destination account.",
        "telREQUIRES_NETWORK_ID" => "This network requires the NetworkID field.",
        "telWRONG_NETWORK" => "The transaction specifies the wrong network ID.",

        // -- tem: malformed transaction ----------------------------------
        "temARRAY_EMPTY" => "A required array in the transaction is empty.",
        "temARRAY_TOO_LARGE" => "An array in the transaction is too large.",
        "temBAD_AMM_TOKENS" => "The AMM token specification is malformed.",
        "temBAD_AMOUNT" => "The amount field is malformed or out of range.",
        "temBAD_CURRENCY" => "The currency field is malformed.",
        "temBAD_EXPIRATION" => "The expiration field is malformed.",
        "temBAD_FEE" => "The fee field is malformed or negative.",
        "temBAD_ISSUER" => "The issuer field is malformed.",
        "temBAD_LIMIT" => "The trust line limit is malformed.",
        "temBAD_NFTOKEN_TRANSFER_FEE" => "The NFToken transfer fee is out of range.",
        "temBAD_OFFER" => "The offer is malformed.",
        "temBAD_PATH" => "A payment path is malformed.",
        "temBAD_PATH_LOOP" => "A payment path contains a loop.",
        "temBAD_QUORUM" => "The signer list quorum is malformed.",
        "temBAD_REGKEY" => "The regular key is malformed or equals the master key.",
        "temBAD_SEND_XRP_LIMIT" => "A direct XRP payment cannot set a limit quality.",
        "temBAD_SEND_XRP_MAX" => "A direct XRP payment cannot use SendMax.",
        "temBAD_SEND_XRP_NO_DIRECT" => "A direct XRP payment cannot forbid the direct path.",
        "temBAD_SEND_XRP_PARTIAL" => "A direct XRP payment cannot be partial.",
        "temBAD_SEND_XRP_PATHS" => "A direct XRP payment cannot include paths.",
        "temBAD_SEQUENCE" => "The sequence number is malformed or out of order.",
        "temBAD_SIGNATURE" => "The signature is malformed.",
        "temBAD_SIGNER" => "The signer list entries are malformed or duplicated.",
        "temBAD_SRC_ACCOUNT" => "The source account field is malformed.",
        "temBAD_TICK_SIZE" => "The tick size is out of range.",
        "temBAD_TRANSFER_RATE" => "The transfer rate is out of range.",
        "temBAD_WEIGHT" => "A signer weight is malformed.",
        "temCANNOT_PREAUTH_SELF" => "An account cannot preauthorize itself.",
        "temDISABLED" => "The transaction requires an amendment that is not enabled.",
        "temDST_IS_SRC" => "The destination account is the same as the source account.",
        "temDST_NEEDED" => "A destination account is required.",
        "temEMPTY_DID" => "The DID transaction contains no data to store.",
        "temINVALID" => "The transaction is invalid.",
        "temINVALID_ACCOUNT_ID" => "An account ID field is invalid.",
        "temINVALID_COUNT" => "A count field is invalid.",
        "temINVALID_FLAG" => "The transaction includes an invalid flag.",
        "temMALFORMED" => "The transaction is malformed.",
        "temREDUNDANT" => "The transaction would have no effect.",
        "temRIPPLE_EMPTY" => "The payment contains an empty path set.",
        "temSEQ_AND_TICKET" => "The transaction specifies both a sequence number and a ticket.",
        "temUNCERTAIN" => "The transaction outcome is uncertain (internal).",
        "temUNKNOWN" => "The transaction requires logic this server does not implement.",
        "temXCHAIN_BAD_PROOF" => "The cross-chain proof is malformed.",
        "temXCHAIN_BRIDGE_BAD_ISSUES" => "The cross-chain bridge issue specification is malformed.",
        "temXCHAIN_BRIDGE_BAD_MIN_ACCOUNT_CREATE_AMOUNT" => "The bridge minimum account-create amount is malformed.",
        "temXCHAIN_BRIDGE_BAD_REWARD_AMOUNT" => "The bridge reward amount is malformed.",
        "temXCHAIN_BRIDGE_NONDOOR_OWNER" => "The bridge owner is not a door account.",
        "temXCHAIN_EQUAL_DOOR_ACCOUNTS" => "The bridge door accounts must differ.",
        "temXCHAIN_TOO_MANY_ATTESTATIONS" => "The cross-chain submission has too many attestations.",

        // -- ter: retry in a later ledger --------------------------------
        "terFUNDS_SPENT" => "The funds were spent by a previously applied transaction.",
        "terINSUF_FEE_B" => "The account balance cannot cover the fee.",
        "terLAST" => "The transaction should be processed last.",
        "terNO_ACCOUNT" => "The source account does not exist.",
        "terNO_AMM" => "The referenced AMM does not exist.",
        "terNO_AUTH" => "The operation is not yet authorized.",
        "terNO_LINE" => "The required trust line does not exist yet.",
        "terNO_RIPPLE" => "The path cannot ripple through the required account.",
        "terOWNERS" => "The account owns objects that defer this operation.",
        "terPRE_SEQ" => "A transaction with an earlier sequence number must be applied first.",
        "terPRE_TICKET" => "The referenced ticket has not been created yet.",
        "terQUEUED" => "The transaction was queued for a future ledger.",
        "terRETRY" => "The transaction should be retried in a later ledger.",

        _ => return None,
    };
    Some(message)
}

/// Classify an engine-result code from a submit envelope.
///
/// Returns `Ok(())` for the `tes` success family. Known failure codes
/// carry the table message; unknown codes fall through to a generic
/// "unsuccessful" error, preferring the node-provided message when one
/// exists.
pub fn classify(code: &str, node_message: Option<&str>) -> Result<(), LedgerError> {
    if code.starts_with("tes") {
        return Ok(());
    }
    let message = match describe(code) {
        Some(msg) => msg.to_string(),
        None => node_message
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_FAILURE)
            .to_string(),
    };
    Err(LedgerError::EngineResult {
        code: code.to_string(),
        message,
    })
}
