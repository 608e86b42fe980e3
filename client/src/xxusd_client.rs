//! The high-level xxUSD client: one method per program operation, each going through the
//! schema-checked encoder and the submission pipeline.

use rust_decimal::Decimal;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_instruction::Instruction;
use solana_sdk::{
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
    },
    signer::Signer,
};
use spl_token_interface::state::Mint;
use xxusd_interface::{
    instructions::schema::ArgValue,
    state::{
        AnchorAccount,
        Controller,
        HedgingStrategy,
        LockManager,
    },
};

use crate::{
    config::{
        jupsol,
        XxusdConfig,
    },
    context::{
        token::TokenContext,
        xxusd::{
            XxusdContext,
            XxusdMints,
        },
    },
    error::XxusdClientError,
    logs::log_success,
    pda::XxusdAddresses,
    print_kv,
    rpc::LedgerRpc,
    transactions::CustomRpcClient,
};

/// UI amount of xxUSD minted to the wallet by [`XxusdClient::mint_test_xxusd`].
pub const TEST_XXUSD_AMOUNT: u64 = 1000;

/// What [`XxusdClient::create_xxusd_mint_and_initialize`] created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    pub signature: Signature,
    pub xxusd_mint: Pubkey,
    pub redeemable_mint: Pubkey,
    pub controller: Pubkey,
    pub test_data: Option<TestData>,
}

/// What [`XxusdClient::mint_test_xxusd`] created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestData {
    pub signature: Signature,
    pub collateral_mint: Pubkey,
    pub user_xxusd: Pubkey,
    pub xxusd_amount: u64,
}

pub struct XxusdClient<R = RpcClient> {
    config: XxusdConfig,
    rpc: CustomRpcClient<R>,
    wallet: Keypair,
    context: XxusdContext,
}

impl XxusdClient<RpcClient> {
    /// Connects to `config.rpc_url` and loads the wallet from `config.wallet_path`.
    pub fn new(config: XxusdConfig) -> Result<Self, XxusdClientError> {
        let wallet = config.load_wallet()?;
        let rpc = CustomRpcClient::new(config.rpc_url.clone(), config.send.clone(), config.program_id);
        Self::from_parts(config, rpc, wallet)
    }
}

impl<R: LedgerRpc> XxusdClient<R> {
    pub fn with_rpc(config: XxusdConfig, client: R, wallet: Keypair) -> Result<Self, XxusdClientError> {
        let rpc = CustomRpcClient::with_client(client, config.send.clone(), config.program_id);
        Self::from_parts(config, rpc, wallet)
    }

    fn from_parts(
        config: XxusdConfig,
        rpc: CustomRpcClient<R>,
        wallet: Keypair,
    ) -> Result<Self, XxusdClientError> {
        let context = XxusdContext::new(config.program_id)?;
        Ok(Self {
            config,
            rpc,
            wallet,
            context,
        })
    }

    pub fn config(&self) -> &XxusdConfig {
        &self.config
    }

    pub fn rpc(&self) -> &CustomRpcClient<R> {
        &self.rpc
    }

    pub fn wallet(&self) -> &Keypair {
        &self.wallet
    }

    pub fn context(&self) -> &XxusdContext {
        &self.context
    }

    pub fn addresses(&self) -> &XxusdAddresses {
        &self.context.addresses
    }

    /// Decodes the program account at `address`.
    pub async fn fetch_account<A: AnchorAccount>(&self, address: &Pubkey) -> Result<A, XxusdClientError> {
        let data = self
            .rpc
            .client
            .account_data(address, self.config.send.commitment)
            .await?
            .ok_or(XxusdClientError::AccountNotFound(*address))?;
        Ok(A::try_from_account_data(&data)?)
    }

    pub async fn fetch_controller(&self) -> Result<Controller, XxusdClientError> {
        self.fetch_account(&self.addresses().controller()).await
    }

    pub async fn fetch_lock_manager(&self) -> Result<LockManager, XxusdClientError> {
        self.fetch_account(&self.addresses().lock_manager()).await
    }

    pub async fn fetch_hedging_strategy(&self) -> Result<HedgingStrategy, XxusdClientError> {
        self.fetch_account(&self.addresses().hedging_strategy()).await
    }

    /// The controller's mints plus the configured collateral mint.
    pub async fn mints(&self) -> Result<XxusdMints, XxusdClientError> {
        let controller = self.fetch_controller().await?;
        Ok(XxusdMints {
            redeemable: controller.redeemable_mint,
            xxusd: controller.xxusd_mint,
            collateral: self.config.collateral_mint,
        })
    }

    async fn send(&self, instruction: Instruction) -> Result<Signature, XxusdClientError> {
        self.rpc.send_single_signer(&self.wallet, [instruction]).await
    }

    /// The `initialize_controller` instruction with the wallet as authority.
    pub fn create_initialize_controller_instruction(
        &self,
        redeemable_mint: &Pubkey,
        xxusd_mint: &Pubkey,
        redeemable_mint_decimals: u8,
    ) -> Result<Instruction, XxusdClientError> {
        Ok(self.context.initialize_controller(
            self.wallet.pubkey(),
            *redeemable_mint,
            *xxusd_mint,
            redeemable_mint_decimals,
        )?)
    }

    /// Initializes the controller for an existing `xxusd_mint`. The program creates the
    /// redeemable mint at a fresh keypair, which co-signs. Returns the signature and that mint.
    pub async fn initialize_controller(
        &self,
        xxusd_mint: &Pubkey,
        redeemable_mint_decimals: u8,
    ) -> Result<(Signature, Pubkey), XxusdClientError> {
        let redeemable_mint = Keypair::new();
        let instruction = self.create_initialize_controller_instruction(
            &redeemable_mint.pubkey(),
            xxusd_mint,
            redeemable_mint_decimals,
        )?;
        let signature = self
            .rpc
            .send_and_confirm_txn(&self.wallet, &[&redeemable_mint], &[instruction])
            .await?;
        Ok((signature, redeemable_mint.pubkey()))
    }

    /// Deposits `collateral_amount` native collateral units and mints redeemable tokens.
    pub async fn mint(&self, collateral_amount: u64) -> Result<Signature, XxusdClientError> {
        let mints = self.mints().await?;
        let user = self.wallet.pubkey();
        self.send(self.context.mint(user, user, &mints, collateral_amount)?)
            .await
    }

    pub async fn redeem(&self, redeemable_amount: u64) -> Result<Signature, XxusdClientError> {
        let mints = self.mints().await?;
        let user = self.wallet.pubkey();
        self.send(self.context.redeem(user, user, &mints, redeemable_amount)?)
            .await
    }

    /// Locks `amount` native xxUSD for `lock_period` seconds.
    pub async fn lock_xxusd(&self, amount: u64, lock_period: i64) -> Result<Signature, XxusdClientError> {
        let mints = self.mints().await?;
        self.send(self.context.lock_xxusd(
            self.wallet.pubkey(),
            &mints.xxusd,
            amount,
            lock_period,
        )?)
        .await
    }

    pub async fn release_xxusd(&self) -> Result<Signature, XxusdClientError> {
        let mints = self.mints().await?;
        self.send(self.context.release_xxusd(self.wallet.pubkey(), &mints.xxusd)?)
            .await
    }

    pub async fn set_product_price(&self, product_id: u64, price: u64) -> Result<Signature, XxusdClientError> {
        self.send(
            self.context
                .manage_product_price(self.wallet.pubkey(), product_id, price)?,
        )
        .await
    }

    /// Reads the price from the controller account; `None` if it was never set.
    pub async fn get_product_price(&self, product_id: u64) -> Result<Option<u64>, XxusdClientError> {
        Ok(self.fetch_controller().await?.product_price(product_id))
    }

    /// Deposits `amount` of the collateral mint into the hedging strategy.
    pub async fn deposit_to_hedging_strategy(&self, amount: u64) -> Result<Signature, XxusdClientError> {
        self.manage_hedging_strategy(amount, true).await
    }

    pub async fn withdraw_from_hedging_strategy(&self, amount: u64) -> Result<Signature, XxusdClientError> {
        self.manage_hedging_strategy(amount, false).await
    }

    async fn manage_hedging_strategy(
        &self,
        amount: u64,
        is_deposit: bool,
    ) -> Result<Signature, XxusdClientError> {
        self.send(self.context.manage_hedging_strategy(
            self.wallet.pubkey(),
            &self.config.collateral_mint,
            amount,
            is_deposit,
        )?)
        .await
    }

    /// Sends any method by name. The call is validated against the schema table before any
    /// network request; `co_signers` covers signer roles other than the wallet.
    pub async fn call<S: AsRef<str>>(
        &self,
        method: &str,
        args: &[ArgValue],
        roles: &[(S, Pubkey)],
        co_signers: &[&dyn Signer],
    ) -> Result<Signature, XxusdClientError> {
        let instruction = self.context.call(method, args, roles)?;
        self.rpc
            .send_and_confirm_txn(&self.wallet, co_signers, &[instruction])
            .await
    }

    /// Creates the xxUSD mint (wallet as mint authority) and initializes the controller in one
    /// transaction, then mints test data if the config asks for it.
    pub async fn create_xxusd_mint_and_initialize(
        &self,
        redeemable_mint_decimals: u8,
    ) -> Result<Deployment, XxusdClientError> {
        let xxusd_mint = Keypair::new();
        let redeemable_mint = Keypair::new();
        let xxusd = TokenContext::new(
            Some(self.wallet.pubkey()),
            xxusd_mint.pubkey(),
            self.config.xxusd_decimals,
        );

        let rent = self
            .rpc
            .client
            .minimum_balance_for_rent_exemption(Mint::LEN)
            .await?;
        let mut instructions = xxusd.create_mint_instructions(&self.wallet.pubkey(), rent)?;
        instructions.push(self.create_initialize_controller_instruction(
            &redeemable_mint.pubkey(),
            &xxusd_mint.pubkey(),
            redeemable_mint_decimals,
        )?);

        let signature = self
            .rpc
            .send_and_confirm_txn(&self.wallet, &[&xxusd_mint, &redeemable_mint], &instructions)
            .await?;

        if self.config.send.debug_logs == Some(true) {
            log_success("Initialized", signature);
            print_kv!("xxUSD mint", xxusd_mint.pubkey());
            print_kv!("Redeemable mint", redeemable_mint.pubkey());
            print_kv!("Controller", self.addresses().controller());
            print_kv!("Program", self.context.program_id());
        }

        let test_data = match self.config.mint_test_xxusd {
            true => Some(self.mint_test_xxusd(&xxusd).await?),
            false => None,
        };

        Ok(Deployment {
            signature,
            xxusd_mint: xxusd_mint.pubkey(),
            redeemable_mint: redeemable_mint.pubkey(),
            controller: self.addresses().controller(),
            test_data,
        })
    }

    /// Creates a mock collateral mint and the wallet's xxUSD account, then mints
    /// [`TEST_XXUSD_AMOUNT`] xxUSD to it. Test deployments only.
    pub async fn mint_test_xxusd(&self, xxusd: &TokenContext) -> Result<TestData, XxusdClientError> {
        let collateral_mint = Keypair::new();
        let collateral = TokenContext::new(
            Some(self.wallet.pubkey()),
            collateral_mint.pubkey(),
            jupsol::DECIMALS,
        );
        let user = self.wallet.pubkey();
        let xxusd_amount = units::ui_to_native(Decimal::from(TEST_XXUSD_AMOUNT), xxusd.mint_decimals)?;

        let rent = self
            .rpc
            .client
            .minimum_balance_for_rent_exemption(Mint::LEN)
            .await?;
        let mut instructions = collateral.create_mint_instructions(&user, rent)?;
        instructions.push(xxusd.create_ata_idempotent(&user, &user));
        instructions.push(xxusd.mint_to_owner(&user, xxusd_amount)?);

        let signature = self
            .rpc
            .send_and_confirm_txn(&self.wallet, &[&collateral_mint], &instructions)
            .await?;

        if self.config.send.debug_logs == Some(true) {
            log_success("Minted test xxUSD", signature);
            print_kv!("Mock collateral mint", collateral_mint.pubkey());
        }

        Ok(TestData {
            signature,
            collateral_mint: collateral_mint.pubkey(),
            user_xxusd: xxusd.get_ata_for(&user),
            xxusd_amount,
        })
    }
}
